/// Pet listings service interface
pub mod pet;
