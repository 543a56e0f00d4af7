pub mod audio;
pub mod captions;
pub mod llm;
pub mod observability;
pub mod storage;
