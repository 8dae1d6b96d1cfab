mod admin;
mod chirps;
pub mod extract;
mod health_check;
mod polka;
mod tokens;
mod users;

pub use admin::{metrics_page, reset_metrics};
pub use chirps::{create_chirp, delete_chirp, get_chirp, list_chirps};
pub use health_check::health_check;
pub use polka::polka_webhook;
pub use tokens::{refresh, revoke};
pub use users::{create_user, login, update_user};
