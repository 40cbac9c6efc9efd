/// Errors raised by the core. All of them are precondition violations:
/// the driver either avoids them by construction or reports them as fatal.

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cell ({row}, {column}) is outside a {size}x{size} field")]
    OutOfBounds { row: i32, column: i32, size: usize },

    #[error("illegal move to ({row}, {column}): cell is occupied or out of bounds")]
    IllegalMove { row: i32, column: i32 },

    #[error("no empty cell left on the field")]
    FieldFull,
}
