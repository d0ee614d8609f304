use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Current UTC timestamp (milliseconds)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a 20 character record key.
///
/// Keys start with a letter and contain only `[a-z0-9]`, so a
/// `"table:key"` id never needs escaping.
pub fn new_record_key() -> String {
    let mut rng = rand::thread_rng();
    let mut key = String::with_capacity(20);
    key.push(LETTERS[rng.gen_range(0..LETTERS.len())] as char);
    for _ in 1..20 {
        key.push(BASE36[rng.gen_range(0..BASE36.len())] as char);
    }
    key
}

/// Build a human-facing order number: `ORD-<millis>-<4 base36 chars>`.
///
/// Uniqueness is not guaranteed here; callers verify against the store.
pub fn generate_order_number(now_ms: i64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..4)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("ORD-{}-{}", now_ms, suffix.to_uppercase())
}
