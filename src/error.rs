/// Failures a single execution step can surface.
///
/// Both variants are fatal to the current step and are never retried
/// internally; whether to halt, skip, or report is the host's decision.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The fetched word does not encode any base instruction.
    #[error("unrecognized opcode {opcode:#06X}")]
    UnrecognizedOpcode { opcode: u16 },

    /// A `ret` executed with no return address on the call stack.
    #[error("returned with an empty call stack")]
    StackUnderflow,
}
