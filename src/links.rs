use chrono::Local;
use rand::Rng;

pub const DEFAULT_BASE_URL: &str = "https://meet.jit.si/";
pub const DEFAULT_ROOM_PREFIX: &str = "FitnessSession_";

const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ID_SUFFIX_LEN: usize = 6;

/// Builds meeting room URLs from a fixed template. Rooms are never created
/// or checked against the meeting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkGenerator {
    base_url: String,
    room_prefix: String,
}

impl Default for LinkGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_ROOM_PREFIX)
    }
}

impl LinkGenerator {
    pub fn new(base_url: &str, room_prefix: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            room_prefix: room_prefix.to_string(),
        }
    }

    /// URL prefix shared by every generated link.
    pub fn room_url_prefix(&self) -> String {
        format!("{}{}", self.base_url, self.room_prefix)
    }

    /// Local timestamp to the second followed by six random `A-Z0-9`
    /// characters. Not guaranteed unique.
    pub fn new_id(&self) -> String {
        let timestamp = Local::now().format("%Y%m%d%H%M%S");
        let mut rng = rand::rng();
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| ID_CHARSET[rng.random_range(0..ID_CHARSET.len())] as char)
            .collect();

        format!("{}{}", timestamp, suffix)
    }

    pub fn new_link(&self) -> String {
        format!("{}{}", self.room_url_prefix(), self.new_id())
    }
}
