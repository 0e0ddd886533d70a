mod clear_screen;
mod emit;
mod execute;
mod show_prompt;
mod type_text;
mod wait;

pub use clear_screen::ClearScreen;
pub use emit::Emit;
pub use execute::Execute;
pub use show_prompt::ShowPrompt;
pub use type_text::TypeText;
pub use wait::Wait;
