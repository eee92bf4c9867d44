pub mod apply;
pub mod create;
