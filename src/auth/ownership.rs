use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::store::article::Article;

/// Only the principal recorded on the article at creation may mutate it.
/// Callers must confirm the article exists first: a missing article is 404,
/// never an ownership failure.
pub fn require_owner(user: &AuthUser, article: &Article) -> Result<(), ApiError> {
    if user.id == article.owner_id {
        Ok(())
    } else {
        Err(ApiError::forbidden(
            "Not Authorized to perform this operation",
        ))
    }
}
