use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};

#[derive(Deserialize)]
struct ValuedMessage<T> {
    #[serde(rename = "_")]
    value: T,
}

#[derive(Serialize)]
struct ValuedMessageRef<'a, T> {
    #[serde(rename = "_")]
    value: &'a T,
}

const FLASH_COOKIE_NAME: &str = "_flash";

/// One-shot message surfaced on the next rendered page
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct FlashData {
    pub kind: String,
    pub message: String,
}

impl FlashData {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: "success".to_owned(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error".to_owned(),
            message: message.into(),
        }
    }
}

/// Reads and clears the flash cookie
pub fn get_flash_cookie<T>(cookies: &Cookies) -> Option<T>
where
    T: DeserializeOwned,
{
    let value = cookies.get(FLASH_COOKIE_NAME).and_then(|flash_cookie| {
        if let Ok(ValuedMessage::<T> { value }) = serde_json::from_str(flash_cookie.value()) {
            Some(value)
        } else {
            None
        }
    })?;

    let mut removal = Cookie::new(FLASH_COOKIE_NAME, "");
    removal.set_path("/");
    cookies.remove(removal);

    Some(value)
}

pub fn set_flash(cookies: &Cookies, data: &FlashData) {
    let valued_message_ref = ValuedMessageRef { value: data };

    let mut cookie = Cookie::new(
        FLASH_COOKIE_NAME,
        serde_json::to_string(&valued_message_ref).unwrap(),
    );
    cookie.set_path("/");
    cookies.add(cookie);
}

pub type PostResponse = (StatusCode, HeaderMap);

/// Stores the flash message and redirects to `location`
pub fn post_response(cookies: &Cookies, data: FlashData, location: &str) -> PostResponse {
    set_flash(cookies, &data);

    let mut header = HeaderMap::new();
    header.insert(header::LOCATION, HeaderValue::from_str(location).unwrap());

    (StatusCode::SEE_OTHER, header)
}

/// Copies a pending flash message into the template context
pub fn insert_flash(ctx: &mut tera::Context, cookies: &Cookies) {
    if let Some(value) = get_flash_cookie::<FlashData>(cookies) {
        ctx.insert("flash", &value);
    }
}
