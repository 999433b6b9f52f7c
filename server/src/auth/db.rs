use crate::db::DbPool;
use crate::models::{NewSession, User};
use crate::schema::{sessions, users};
use diesel::prelude::*;

use super::crypto::{generate_token, hash_token};

/// Create a session row for the user and return the raw token. Only the
/// SHA-256 of the token is stored; the raw value is shown to the client once.
pub fn create_session(
    conn: &mut PgConnection,
    user_id: uuid::Uuid,
) -> Result<String, diesel::result::Error> {
    let token = generate_token();
    let token_hash = hash_token(&token);

    let new_session = NewSession {
        user_id,
        token_hash: &token_hash,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

pub async fn get_user_from_token(pool: &DbPool, token: &str) -> Option<User> {
    let mut conn = pool.get().ok()?;
    let token_hash = hash_token(token);

    sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .select(User::as_select())
        .first(&mut conn)
        .ok()
}
