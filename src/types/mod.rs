pub mod horizon;
pub mod variable;
pub mod yearly;
