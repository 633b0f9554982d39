mod quiz_vm;

pub use quiz_vm::{FeedbackVm, OptionVm, QuizIntent, QuizScreen, QuizVm};
