//! Background jobs.

mod email_job;
mod queue;

pub use email_job::{deliver, email_job_handler, DeliveryContext, EmailJob, LogMailer, Mailer};
pub use queue::{EmailQueue, PostgresEmailQueue};

#[cfg(any(test, feature = "test-utils"))]
pub use email_job::MockMailer;
#[cfg(any(test, feature = "test-utils"))]
pub use queue::MockEmailQueue;
