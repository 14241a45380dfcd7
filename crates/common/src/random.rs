//! Random identity data for test isolation
//!
//! Every fixture registers a fresh user so that suites never collide on
//! unique email constraints, even across interrupted runs that left
//! rows behind.

use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "example.com",
    "yourdomain.com",
];

/// Special characters the backend accepts in passwords
const PASSWORD_SPECIALS: &[u8] = b"@$!%*?&";

/// Generate a "Firstname Lastname" pair of capitalized random words.
pub fn random_name() -> String {
    let mut rng = thread_rng();
    let first_len = rng.gen_range(4..=8);
    let last_len = rng.gen_range(4..=10);
    format!(
        "{} {}",
        capitalized_word(&mut rng, first_len),
        capitalized_word(&mut rng, last_len)
    )
}

/// Generate a random mailbox on one of a fixed set of domains.
pub fn random_email() -> String {
    let mut rng = thread_rng();
    let user: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    let domain = EMAIL_DOMAINS
        .choose(&mut rng)
        .copied()
        .unwrap_or("example.com");
    format!("{}@{}", user, domain)
}

/// Generate a password of `length` characters containing at least one
/// lowercase letter, one uppercase letter, one digit, and one special
/// character. The backend rejects weaker passwords at registration.
pub fn random_password(length: usize) -> String {
    let mut rng = thread_rng();
    let length = length.max(4);

    let mut chars: Vec<char> = vec![
        rng.gen_range(b'a'..=b'z') as char,
        rng.gen_range(b'A'..=b'Z') as char,
        rng.gen_range(b'0'..=b'9') as char,
        *PASSWORD_SPECIALS.choose(&mut rng).unwrap_or(&b'@') as char,
    ];

    let pool: Vec<char> = (b'a'..=b'z')
        .chain(b'A'..=b'Z')
        .chain(b'0'..=b'9')
        .chain(b"!@#$%".iter().copied())
        .map(char::from)
        .collect();

    for _ in 0..length - 4 {
        chars.push(*pool.choose(&mut rng).unwrap_or(&'x'));
    }
    chars.shuffle(&mut rng);
    chars.into_iter().collect()
}

/// Default-length password
pub fn default_password() -> String {
    random_password(10)
}

fn capitalized_word(rng: &mut impl Rng, len: usize) -> String {
    let mut word: String = (0..len)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect();
    if let Some(first) = word.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    word
}
