pub mod types;

pub use types::{
    AnswerMap, AnswerSources, Difficulty, QuestionKind, QuestionRecord, ScanReport,
};
