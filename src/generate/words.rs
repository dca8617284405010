//! Small built-in word pools standing in for a faker library.

use rand::seq::SliceRandom;
use rand::Rng;

pub const COUNTRIES: &[(&str, &str)] = &[
    ("Algeria", "DZ"), ("Argentina", "AR"), ("Australia", "AU"), ("Brazil", "BR"),
    ("Canada", "CA"), ("China", "CN"), ("Denmark", "DK"), ("Egypt", "EG"),
    ("France", "FR"), ("Germany", "DE"), ("Greece", "GR"), ("India", "IN"),
    ("Indonesia", "ID"), ("Iran", "IR"), ("Italy", "IT"), ("Japan", "JP"),
    ("Kenya", "KE"), ("Malaysia", "MY"), ("Mexico", "MX"), ("Morocco", "MA"),
    ("Netherlands", "NL"), ("Norway", "NO"), ("Oman", "OM"), ("Pakistan", "PK"),
    ("Peru", "PE"), ("Portugal", "PT"), ("Qatar", "QA"), ("Saudi Arabia", "SA"),
    ("Singapore", "SG"), ("South Africa", "ZA"), ("South Korea", "KR"), ("Spain", "ES"),
    ("Sweden", "SE"), ("Turkey", "TR"), ("United Arab Emirates", "AE"),
    ("United Kingdom", "GB"), ("United States", "US"), ("Vietnam", "VN"),
];

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda",
    "David", "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
    "Thomas", "Sarah", "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa",
    "Anthony", "Betty", "Mark", "Sandra", "Steven", "Ashley", "Paul", "Emily",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Thompson", "White", "Harris", "Clark",
    "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright", "Scott",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Group", "Ltd", "and Sons", "PLC"];

const DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.test"];

const STREET_SUFFIXES: &[&str] = &["Street", "Avenue", "Road", "Lane", "Boulevard", "Way", "Drive"];

const CITIES: &[&str] = &[
    "Port Vincent", "Lake Mary", "East Harbor", "North Bay", "Westfield", "Riverside",
    "Springfield", "Fairview", "Marion", "Georgetown", "Clinton", "Salem",
];

const STATES: &[&str] = &["CA", "TX", "NY", "FL", "WA", "OR", "NJ", "GA", "VA", "MA"];

const BS_VERBS: &[&str] = &[
    "streamline", "optimize", "integrate", "deliver", "scale", "orchestrate", "leverage",
    "synchronize", "automate", "consolidate",
];

const BS_ADJECTIVES: &[&str] = &[
    "end-to-end", "real-time", "scalable", "cross-platform", "intermodal", "bonded",
    "seamless", "dynamic", "global", "just-in-time",
];

const BS_NOUNS: &[&str] = &[
    "container logistics", "cargo handling", "berth scheduling", "supply chains",
    "freight services", "customs clearance", "yard operations", "warehousing",
    "vessel turnaround", "port services",
];

const WORDS: &[&str] = &[
    "cargo", "vessel", "berth", "crane", "manifest", "shift", "customs", "yard", "gate",
    "container", "quay", "pilot", "tug", "invoice", "record", "review", "schedule",
    "delivery", "inspection", "approved", "pending", "updated", "checked", "noted",
];

pub fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &'a [&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

pub fn country<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str) {
    COUNTRIES.choose(rng).copied().unwrap_or(("Unknown", "XX"))
}

pub fn person_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

pub fn company<R: Rng + ?Sized>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!("{} {}", pick(rng, LAST_NAMES), pick(rng, COMPANY_SUFFIXES)),
        1 => format!("{}-{}", pick(rng, LAST_NAMES), pick(rng, LAST_NAMES)),
        _ => format!(
            "{}, {} and {}",
            pick(rng, LAST_NAMES),
            pick(rng, LAST_NAMES),
            pick(rng, LAST_NAMES)
        ),
    }
}

pub fn user_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}{}{}",
        pick(rng, FIRST_NAMES).to_lowercase(),
        pick(rng, LAST_NAMES).to_lowercase(),
        rng.gen_range(1..100)
    )
}

pub fn email<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}@{}", user_name(rng), pick(rng, DOMAINS))
}

pub fn company_email<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}@{}.com",
        pick(rng, FIRST_NAMES).to_lowercase(),
        pick(rng, LAST_NAMES).to_lowercase()
    )
}

pub fn phone_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "({:03}) {:03}-{:04}",
        rng.gen_range(200..1000),
        rng.gen_range(200..1000),
        rng.gen_range(0..10000)
    )
}

/// Single-line postal address.
pub fn address<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}, {}, {} {:05}",
        rng.gen_range(1..10000),
        pick(rng, LAST_NAMES),
        pick(rng, STREET_SUFFIXES),
        pick(rng, CITIES),
        pick(rng, STATES),
        rng.gen_range(501..100000)
    )
}

/// Business-speak phrase, e.g. "Streamline Scalable Cargo Handling".
pub fn bs<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(rng, BS_VERBS),
        pick(rng, BS_ADJECTIVES),
        pick(rng, BS_NOUNS)
    )
}

pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.gen_range(4..10);
    let words: Vec<&str> = (0..len).map(|_| pick(rng, WORDS)).collect();
    let mut s = title_case(words[0]);
    for w in &words[1..] {
        s.push(' ');
        s.push_str(w);
    }
    s.push('.');
    s
}

/// `?` becomes an uppercase letter, `#` a digit; everything else is copied.
pub fn bothify<R: Rng + ?Sized>(rng: &mut R, pattern: &str) -> String {
    pattern
        .chars()
        .map(|c| match c {
            '?' => rng.gen_range(b'A'..=b'Z') as char,
            '#' => rng.gen_range(b'0'..=b'9') as char,
            other => other,
        })
        .collect()
}
