pub mod field;
pub mod layout;
pub mod op;
pub mod pseudo;
pub mod reg;
pub mod section;
