pub mod issue;
pub mod newsletter;
