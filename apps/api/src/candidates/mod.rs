// Candidate profiles: storage, validation, strength scoring, recruiter contact.
// Handlers only talk to `CandidateService`; storage sits behind `CandidateRepository`.

pub mod contact;
pub mod handlers;
pub mod service;
pub mod store;
pub mod strength;
pub mod validation;
