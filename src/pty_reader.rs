use std::io::Read;
use std::thread;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

/// Spawns a background thread to read from a PTY until EOF
pub fn spawn_reader<R: Read + Send + 'static>(mut reader: R) -> UnboundedReceiver<Vec<u8>> {
    let (tx, rx) = unbounded_channel();

    thread::spawn(move || {
        let mut buffer = [0u8; 4096];
        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break, // EOF
                Ok(n) => {
                    if tx.send(buffer[..n].to_vec()).is_err() {
                        break; // Receiver dropped
                    }
                }
                // Linux reports EIO once the last slave handle is closed.
                Err(_) => break,
            }
        }
    });

    rx
}
