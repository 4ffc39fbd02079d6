pub mod decoder;
pub mod frames;
pub mod session;

pub use decoder::LineDecoder;
pub use frames::EventFrame;
pub use session::{StreamingChatSession, TurnOutcome};
