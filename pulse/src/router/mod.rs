mod batch;
mod health;
mod quote;
mod util;
