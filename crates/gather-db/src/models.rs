use gather_types::models::User;

/// A user together with the stored password hash.
///
/// Only returned by `Database::get_user_by_email` for login. Handlers hand
/// out `user`, never this struct.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}
