//! Fabricated donor contact records.

use crate::gen::Gen;
use crate::generators::{bool_with_prob, one_of, uniform, BoolWithProb, OneOf, Uniform};
use rand::RngCore;

/// A donor record ready to hand to a storage sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDonor {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    /// Two-letter postal abbreviation
    pub state: String,
    /// Five-digit zip code inside `state`'s range
    pub zip: String,
}

/// A state with the inclusive range of three-digit zip prefixes it owns.
pub type StateZips = (&'static str, u32, u32);

/// Generates plausible, independent donor records.
///
/// The state is chosen first and the zip code is drawn from that state's
/// prefix range, so every record is internally consistent.
pub struct DonorFabricator {
    first_names: OneOf<&'static str>,
    last_names: OneOf<&'static str>,
    initials: OneOf<char>,
    middle_initial: BoolWithProb,
    street_numbers: Uniform<u32>,
    street_names: OneOf<&'static str>,
    street_suffixes: OneOf<&'static str>,
    apartment: BoolWithProb,
    apartment_numbers: Uniform<u32>,
    city_prefixes: OneOf<&'static str>,
    city_suffixes: OneOf<&'static str>,
    prefixed_city: BoolWithProb,
    states: OneOf<StateZips>,
    zip_tails: Uniform<u32>,
    email_domains: OneOf<&'static str>,
    email_numbers: Uniform<u32>,
}

impl Default for DonorFabricator {
    fn default() -> Self {
        Self {
            first_names: one_of(FIRST_NAMES),
            last_names: one_of(LAST_NAMES),
            initials: one_of(INITIALS),
            middle_initial: bool_with_prob(0.10),
            street_numbers: uniform(1..10_000),
            street_names: one_of(STREET_NAMES),
            street_suffixes: one_of(STREET_SUFFIXES),
            apartment: bool_with_prob(0.15),
            apartment_numbers: uniform(1..1000),
            city_prefixes: one_of(CITY_PREFIXES),
            city_suffixes: one_of(CITY_SUFFIXES),
            prefixed_city: bool_with_prob(0.25),
            states: one_of(STATES),
            zip_tails: uniform(0..100),
            email_domains: one_of(EMAIL_DOMAINS),
            email_numbers: uniform(1..100),
        }
    }
}

impl DonorFabricator {
    fn name(&self, first: &str, last: &str, rng: &mut dyn RngCore) -> String {
        if self.middle_initial.generate(rng) {
            format!("{} {}. {}", first, self.initials.generate(rng), last)
        } else {
            format!("{} {}", first, last)
        }
    }

    fn email(&self, first: &str, last: &str, rng: &mut dyn RngCore) -> String {
        format!(
            "{}.{}{}@{}",
            email_local_part(first),
            email_local_part(last),
            self.email_numbers.generate(rng),
            self.email_domains.generate(rng)
        )
    }

    fn address(&self, rng: &mut dyn RngCore) -> String {
        let street = format!(
            "{} {} {}",
            self.street_numbers.generate(rng),
            self.street_names.generate(rng),
            self.street_suffixes.generate(rng)
        );
        if self.apartment.generate(rng) {
            format!("{} Apt. {}", street, self.apartment_numbers.generate(rng))
        } else {
            street
        }
    }

    fn city(&self, rng: &mut dyn RngCore) -> String {
        let stem = self.last_names.generate(rng);
        if self.prefixed_city.generate(rng) {
            format!("{} {}", self.city_prefixes.generate(rng), stem)
        } else {
            format!("{}{}", stem, self.city_suffixes.generate(rng))
        }
    }

    fn state_and_zip(&self, rng: &mut dyn RngCore) -> (String, String) {
        let (abbr, low, high) = self.states.generate(rng);
        let prefix = uniform(low..high + 1).generate(rng);
        let zip = prefix * 100 + self.zip_tails.generate(rng);
        (abbr.to_string(), format!("{:05}", zip))
    }
}

impl Gen<NewDonor> for DonorFabricator {
    fn generate(&self, rng: &mut dyn RngCore) -> NewDonor {
        let first = self.first_names.generate(rng);
        let last = self.last_names.generate(rng);
        let name = self.name(first, last, rng);
        let email = self.email(first, last, rng);
        let address = self.address(rng);
        let city = self.city(rng);
        let (state, zip) = self.state_and_zip(rng);

        NewDonor {
            name,
            email,
            address,
            city,
            state,
            zip,
        }
    }
}

/// Whether `zip` falls inside the prefix range of the state `abbr`.
pub fn zip_in_state(abbr: &str, zip: &str) -> bool {
    let Some(&(_, low, high)) = STATES.iter().find(|(s, _, _)| *s == abbr) else {
        return false;
    };
    if zip.len() != 5 || !zip.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match zip[..3].parse::<u32>() {
        Ok(prefix) => (low..=high).contains(&prefix),
        Err(_) => false,
    }
}

fn email_local_part(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

const FIRST_NAMES: &[&str] = &[
    "Alice", "Amara", "Benjamin", "Carlos", "Chloe", "Daniel", "Diana", "Elena", "Ethan", "Fatima",
    "Gabriel", "Grace", "Hannah", "Hiroshi", "Isaac", "Isabel", "Jamal", "Julia", "Kevin", "Leah",
    "Liam", "Lucia", "Marcus", "Maya", "Nathan", "Nora", "Oliver", "Priya", "Quinn", "Rafael",
    "Rosa", "Samuel", "Sofia", "Thomas", "Uma", "Victor", "Wei", "Xavier", "Yara", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Baker", "Bennett", "Brooks", "Castillo", "Chen", "Clark", "Dawson", "Edwards",
    "Fischer", "Garcia", "Graham", "Harris", "Hughes", "Ito", "Jensen", "Kowalski", "Larsen",
    "Martin", "Moreno", "Nakamura", "Nguyen", "O'Brien", "Okafor", "Patel", "Quinlan", "Reyes",
    "Russo", "Schmidt", "Singh", "Sullivan", "Thompson", "Underwood", "Vargas", "Walker",
    "Whitaker", "Xu", "Young", "Zimmerman",
];

const INITIALS: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'R', 'S', 'T', 'W',
];

const STREET_NAMES: &[&str] = &[
    "Maple", "Oak", "Cedar", "Pine", "Elm", "Willow", "Aspen", "Birch", "Juniper", "Sycamore",
    "Lincoln", "Washington", "Jefferson", "Franklin", "Main", "Park", "Lake", "Hill", "River",
    "Sunset", "Highland", "Meadow", "Orchard", "Prospect",
];

const STREET_SUFFIXES: &[&str] = &[
    "Street", "Avenue", "Road", "Lane", "Drive", "Court", "Way", "Boulevard", "Place", "Terrace",
];

const CITY_PREFIXES: &[&str] = &["North", "South", "East", "West", "New", "Port", "Lake", "Fort"];

const CITY_SUFFIXES: &[&str] = &[
    "ton", "ville", "burg", "port", "field", "wood", "haven", " Springs", " Falls", " Heights",
];

const EMAIL_DOMAINS: &[&str] = &[
    "example.com",
    "example.org",
    "example.net",
    "mail.example",
    "inbox.example",
];

/// States with their USPS zip prefix ranges.
const STATES: &[StateZips] = &[
    ("AL", 350, 369),
    ("AK", 995, 999),
    ("AZ", 850, 865),
    ("AR", 716, 729),
    ("CA", 900, 961),
    ("CO", 800, 816),
    ("CT", 60, 69),
    ("DE", 197, 199),
    ("DC", 200, 205),
    ("FL", 320, 349),
    ("GA", 300, 319),
    ("HI", 967, 968),
    ("ID", 832, 838),
    ("IL", 600, 629),
    ("IN", 460, 479),
    ("IA", 500, 528),
    ("KS", 660, 679),
    ("KY", 400, 427),
    ("LA", 700, 714),
    ("ME", 39, 49),
    ("MD", 206, 219),
    ("MA", 10, 27),
    ("MI", 480, 499),
    ("MN", 550, 567),
    ("MS", 386, 397),
    ("MO", 630, 658),
    ("MT", 590, 599),
    ("NE", 680, 693),
    ("NV", 889, 898),
    ("NH", 30, 38),
    ("NJ", 70, 89),
    ("NM", 870, 884),
    ("NY", 100, 149),
    ("NC", 270, 289),
    ("ND", 580, 588),
    ("OH", 430, 459),
    ("OK", 730, 749),
    ("OR", 970, 979),
    ("PA", 150, 196),
    ("RI", 28, 29),
    ("SC", 290, 299),
    ("SD", 570, 577),
    ("TN", 370, 385),
    ("TX", 750, 799),
    ("UT", 840, 847),
    ("VT", 50, 59),
    ("VA", 220, 246),
    ("WA", 980, 994),
    ("WV", 247, 268),
    ("WI", 530, 549),
    ("WY", 820, 831),
];
