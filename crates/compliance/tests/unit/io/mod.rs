/// Host-level `check_gpr_eq`.
pub mod assert;




/// Lexing and immediate literals.
pub mod parse;
