use crate::error::MyNoteError;
use actix_web::HttpRequest;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mynote_domain::ID;
use mynote_infra::MyNoteContext;
use serde::{Deserialize, Serialize};

pub const TOKEN_COOKIE: &str = "jwt";

/// Claims of a user token, `{ "user_id": .., "exp": .. }`
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub user_id: ID, // Subject (whom token refers to)
}

/// Issues a HS256 token for `user_id` which is valid for `ttl_secs`
pub fn create_user_token(user_id: &ID, secret: &str, ttl_secs: i64) -> anyhow::Result<String> {
    let claims = Claims {
        exp: (Utc::now().timestamp() + ttl_secs) as usize,
        user_id: *user_id,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

pub(crate) fn decode_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?
    .claims;

    Ok(claims)
}

fn get_token(req: &HttpRequest) -> Option<String> {
    if let Some(header) = req.headers().get("authorization") {
        return header.to_str().ok().map(parse_authtoken_header);
    }
    req.cookie(TOKEN_COOKIE).map(|cookie| cookie.value().to_string())
}

/// Resolves the `User` making the request from either the
/// `Authorization` header or the `jwt` cookie
pub fn protect_route(req: &HttpRequest, ctx: &MyNoteContext) -> Result<ID, MyNoteError> {
    let token = get_token(req).ok_or_else(|| {
        MyNoteError::Unauthorized("Missing user token in authorization header or cookie".into())
    })?;
    decode_token(&token, &ctx.config.jwt_secret)
        .map(|claims| claims.user_id)
        .map_err(|e| MyNoteError::Unauthorized(format!("Invalid user token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_issued_token() {
        let user_id = ID::default();
        let token = create_user_token(&user_id, "secret", 60).unwrap();
        assert_eq!(decode_token(&token, "secret").unwrap().user_id, user_id);
    }

    #[test]
    fn rejects_token_with_other_secret() {
        let token = create_user_token(&ID::default(), "secret", 60).unwrap();
        assert!(decode_token(&token, "other-secret").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let token = create_user_token(&ID::default(), "secret", -3600).unwrap();
        assert!(decode_token(&token, "secret").is_err());
    }

    #[test]
    fn parses_bearer_header() {
        assert_eq!(parse_authtoken_header("Bearer abc.def"), "abc.def");
        assert_eq!(parse_authtoken_header("abc.def"), "abc.def");
    }

    #[test]
    fn decodes_token_with_snake_case_user_id_claim() {
        #[derive(Serialize)]
        struct RawClaims {
            user_id: String,
            exp: usize,
        }

        let user_id = ID::default();
        let claims = RawClaims {
            user_id: user_id.to_string(),
            exp: (Utc::now().timestamp() + 60) as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("secret".as_bytes()),
        )
        .unwrap();
        assert_eq!(decode_token(&token, "secret").unwrap().user_id, user_id);
    }
}
