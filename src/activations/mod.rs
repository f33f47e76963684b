// Echo is the service this hub exists for
pub mod echo;

// Health lets supervisors probe liveness without sending echo traffic
pub mod health;
