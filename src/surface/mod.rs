//! Interactive surfaces the dialogue loop renders through.
//!
//! The dialogue calls [`Surface::render_message`] for every message it
//! appends, except the assistant reply that was already delivered through
//! [`Surface::render_chunk`] while it streamed.

mod credential;
mod terminal;

pub use credential::{CredentialMask, CredentialPrompt};
pub use terminal::{SurfaceAction, TerminalSurface};

use crate::conversation::Message;

pub trait Surface {
    fn render_message(&mut self, message: &Message);

    /// An assistant reply is about to stream in.
    fn begin_stream(&mut self) {}

    fn render_chunk(&mut self, chunk: &str);

    /// The reply finished streaming, successfully or not.
    fn end_stream(&mut self) {}
}
