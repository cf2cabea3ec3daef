mod interview_port;

pub use interview_port::InterviewPort;
