pub use error::Error;
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use processor::{FrameBuffer, Options, Processor};

pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
mod processor;
