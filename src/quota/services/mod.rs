//! Application services for daily quota admission control.

mod admission;

pub use admission::{
    AdmissionError, AdmissionResult, AdmissionStage, CreateTaskRequest, RegisterUserRequest,
    TaskAdmissionService,
};
