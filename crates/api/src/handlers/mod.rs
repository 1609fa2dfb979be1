pub mod category;
pub mod contributions;
pub mod edit;
pub mod practice;
