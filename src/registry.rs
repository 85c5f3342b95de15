// src/registry.rs
//! # Reference Registry
//!
//! Static domain knowledge used by the generator and the classifier:
//! the ordered city → state table, travel categories, entity whitelists,
//! the movie catalog, per-entity text templates and the per-domain
//! synthesis profiles.
//!
//! The registry is plain data. Build it once with [`Registry::builtin`] and pass
//! it by reference (or behind an `Arc`) into every pipeline call.

use std::collections::HashMap;

use crate::topic::TopicDomain;

/// Placeholder substituted with the chosen entity name in entity templates.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Fallback for unresolved locations, states and missing user metadata.
pub const UNKNOWN: &str = "Unknown";
/// Fallback for unresolved entities and categories.
pub const OTHER: &str = "Other";

pub const SEXES: [&str; 3] = ["M", "F", "Other"];
pub const AGE_GROUPS: [&str; 4] = ["18-24", "25-34", "35-44", "45+"];

/// Text templates for one entity (a city, party, politician or sport).
#[derive(Debug, Clone)]
pub struct EntityTemplates {
    pub name: String,
    pub templates: Vec<String>,
}

/// A movie with its industry and the cities where it is discussed.
#[derive(Debug, Clone)]
pub struct MovieEntry {
    pub title: String,
    pub industry: String,
    pub locations: Vec<String>,
}

/// Random ranges and demographic weights for one topic domain.
#[derive(Debug, Clone)]
pub struct SynthProfile {
    /// Inclusive base range for likes before jitter.
    pub likes: (u64, u64),
    /// Multiplier applied to the base likes.
    pub jitter: (f64, f64),
    /// Retweets as a fraction of likes.
    pub retweet_fraction: (f64, f64),
    /// Weights over [`SEXES`].
    pub sex_weights: [u32; 3],
    /// Weights over [`AGE_GROUPS`].
    pub age_weights: [u32; 4],
    /// Display label prefix for synthetic user names.
    pub user_label: &'static str,
}

#[derive(Debug, Clone)]
pub struct Registry {
    /// Ordered (city, state) pairs. Scanned in order; the first substring hit wins.
    pub locations: Vec<(String, String)>,
    pub travel_categories: HashMap<String, String>,
    pub parties: Vec<String>,
    /// Regional politicians first, then national ones.
    pub politicians: Vec<String>,
    pub sports: Vec<String>,
    pub sports_persons: Vec<String>,
    pub industries: Vec<String>,
    pub movies: Vec<MovieEntry>,
    pub travel_templates: Vec<EntityTemplates>,
    pub party_templates: Vec<EntityTemplates>,
    pub politician_templates: Vec<EntityTemplates>,
    pub sport_templates: Vec<EntityTemplates>,
    /// Cinema templates use `{movie}`, `{loc}` and `{industry}`.
    pub cinema_templates: Vec<String>,
    pub travel_profile: SynthProfile,
    pub politics_profile: SynthProfile,
    pub sports_profile: SynthProfile,
    pub cinema_profile: SynthProfile,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// Synthesis profile for a topic domain.
    pub fn profile(&self, domain: TopicDomain) -> &SynthProfile {
        match domain {
            TopicDomain::Travel => &self.travel_profile,
            TopicDomain::Politics => &self.politics_profile,
            TopicDomain::Sports => &self.sports_profile,
            TopicDomain::Cinema => &self.cinema_profile,
        }
    }

    /// Resolve raw location text to `(city, state)`.
    ///
    /// Scans the ordered table and stops at the first city that occurs as a
    /// case-insensitive substring. Without a match the raw text is kept and the
    /// state is `"Unknown"`.
    pub fn resolve_location(&self, raw: &str) -> (String, String) {
        let raw_lower = raw.to_lowercase();
        self.locations
            .iter()
            .find(|(city, _)| raw_lower.contains(&city.to_lowercase()))
            .map(|(city, state)| (city.clone(), state.clone()))
            .unwrap_or_else(|| (raw.to_string(), UNKNOWN.to_string()))
    }

    /// Coarse travel category for a normalized location, `"Other"` if unmapped.
    pub fn category_for(&self, location: &str) -> &str {
        self.travel_categories
            .get(location)
            .map(String::as_str)
            .unwrap_or(OTHER)
    }

    pub fn movie(&self, title: &str) -> Option<&MovieEntry> {
        self.movies.iter().find(|m| m.title == title)
    }

    pub fn is_known_industry(&self, industry: &str) -> bool {
        self.industries.iter().any(|i| i == industry)
    }

    /// Built-in India-focused reference data.
    pub fn builtin() -> Self {
        let mut politicians = owned(REGIONAL_POLITICIANS);
        politicians.extend(owned(NATIONAL_POLITICIANS));

        Self {
            locations: CITY_STATES
                .iter()
                .map(|(c, s)| (c.to_string(), s.to_string()))
                .collect(),
            travel_categories: TRAVEL_CATEGORIES
                .iter()
                .map(|(l, c)| (l.to_string(), c.to_string()))
                .collect(),
            parties: owned(PARTIES),
            politicians,
            sports: owned(SPORTS),
            sports_persons: owned(SPORTS_PERSONS),
            industries: owned(INDUSTRIES),
            movies: MOVIES
                .iter()
                .map(|(title, industry, locs)| MovieEntry {
                    title: title.to_string(),
                    industry: industry.to_string(),
                    locations: owned(locs),
                })
                .collect(),
            travel_templates: entity_templates(TRAVEL_TEMPLATES),
            party_templates: entity_templates(PARTY_TEMPLATES),
            politician_templates: entity_templates(POLITICIAN_TEMPLATES),
            sport_templates: entity_templates(SPORT_TEMPLATES),
            cinema_templates: owned(CINEMA_TEMPLATES),
            travel_profile: SynthProfile {
                likes: (50, 1000),
                jitter: (0.8, 1.5),
                retweet_fraction: (0.1, 0.3),
                sex_weights: [4, 4, 1],
                age_weights: [3, 4, 2, 1],
                user_label: "Traveler",
            },
            politics_profile: SynthProfile {
                likes: (100, 1500),
                jitter: (0.8, 1.5),
                retweet_fraction: (0.1, 0.35),
                sex_weights: [5, 3, 1],
                age_weights: [2, 4, 3, 2],
                user_label: "Voter",
            },
            sports_profile: SynthProfile {
                likes: (100, 2000),
                jitter: (0.8, 1.5),
                retweet_fraction: (0.15, 0.4),
                sex_weights: [4, 3, 1],
                age_weights: [3, 4, 2, 1],
                user_label: "Fan",
            },
            cinema_profile: SynthProfile {
                likes: (50, 1200),
                jitter: (0.8, 1.6),
                retweet_fraction: (0.1, 0.35),
                sex_weights: [4, 4, 1],
                age_weights: [3, 4, 2, 1],
                user_label: "MovieFan",
            },
        }
    }
}

/// First whitelist entry that occurs (case-insensitively) in `text`, else `"Other"`.
pub fn first_mention(list: &[String], text: &str) -> String {
    let text_lower = text.to_lowercase();
    list.iter()
        .find(|name| text_lower.contains(&name.to_lowercase()))
        .cloned()
        .unwrap_or_else(|| OTHER.to_string())
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn entity_templates(items: &[(&str, &[&str])]) -> Vec<EntityTemplates> {
    items
        .iter()
        .map(|(name, templates)| EntityTemplates {
            name: name.to_string(),
            templates: owned(templates),
        })
        .collect()
}

// ---- data ----

// Order matters: alias spellings sit next to their canonical city.
const CITY_STATES: &[(&str, &str)] = &[
    ("Goa", "Goa"),
    ("Jaipur", "Rajasthan"),
    ("Manali", "Himachal Pradesh"),
    ("Kerala", "Kerala"),
    ("Rishikesh", "Uttarakhand"),
    ("Mumbai", "Maharashtra"),
    ("Delhi", "Delhi"),
    ("Bangalore", "Karnataka"),
    ("Mysore", "Karnataka"),
    ("Mangaluru", "Karnataka"),
    ("Mangalore", "Karnataka"),
    ("Udupi", "Karnataka"),
    ("Hubli", "Karnataka"),
    ("Hubballi", "Karnataka"),
    ("Belagavi", "Karnataka"),
    ("Belgaum", "Karnataka"),
    ("Davangere", "Karnataka"),
    ("Tumakuru", "Karnataka"),
    ("Tumkur", "Karnataka"),
    ("Chikmagalur", "Karnataka"),
    ("Chikkamagaluru", "Karnataka"),
    ("Coorg", "Karnataka"),
    ("Kodagu", "Karnataka"),
    ("Gokarna", "Karnataka"),
    ("Hampi", "Karnataka"),
    ("Varanasi", "Uttar Pradesh"),
    ("Agra", "Uttar Pradesh"),
    ("Udaipur", "Rajasthan"),
    ("Shimla", "Himachal Pradesh"),
    ("Ladakh", "Ladakh"),
    ("Ooty", "Tamil Nadu"),
    ("Darjeeling", "West Bengal"),
    ("Andaman", "Andaman and Nicobar Islands"),
    ("Kolkata", "West Bengal"),
    ("Chennai", "Tamil Nadu"),
    ("Hyderabad", "Telangana"),
    ("Pune", "Maharashtra"),
    ("Amritsar", "Punjab"),
    ("Jaisalmer", "Rajasthan"),
    ("Lucknow", "Uttar Pradesh"),
    ("Patna", "Bihar"),
    ("Bhopal", "Madhya Pradesh"),
    ("Ahmedabad", "Gujarat"),
];

const TRAVEL_CATEGORIES: &[(&str, &str)] = &[
    ("Goa", "Beach"),
    ("Andaman", "Beach"),
    ("Kerala", "Beach"),
    ("Mumbai", "Beach"),
    ("Shimla", "Hill"),
    ("Ooty", "Hill"),
    ("Darjeeling", "Hill"),
    ("Manali", "Mountains"),
    ("Ladakh", "Mountains"),
    ("Rishikesh", "Trekking"),
    ("Varanasi", "Religious"),
    ("Amritsar", "Religious"),
];

const PARTIES: &[&str] = &["BJP", "Congress", "JDS", "AAP"];

const REGIONAL_POLITICIANS: &[&str] = &[
    "Siddaramaiah",
    "DK Shivakumar",
    "BS Yediyurappa",
    "Basavaraj Bommai",
    "HD Kumaraswamy",
    "HD Deve Gowda",
];

const NATIONAL_POLITICIANS: &[&str] = &[
    "Narendra Modi",
    "Amit Shah",
    "Rahul Gandhi",
    "Priyanka Gandhi",
    "Arvind Kejriwal",
    "Yogi Adityanath",
];

const SPORTS: &[&str] = &["Cricket", "Football", "Kabaddi", "Hockey", "Volleyball", "Chess"];

const SPORTS_PERSONS: &[&str] = &[
    "Virat Kohli",
    "Rohit Sharma",
    "MS Dhoni",
    "Hardik Pandya",
    "Sunil Chhetri",
    "PV Sindhu",
    "Neeraj Chopra",
    "Saina Nehwal",
];

const INDUSTRIES: &[&str] = &["Hollywood", "Bollywood", "Sandalwood", "Tollywood", "Mollywood"];

const MOVIES: &[(&str, &str, &[&str])] = &[
    ("Dune 2", "Hollywood", &["Mumbai", "Delhi", "Bangalore"]),
    ("Oppenheimer", "Hollywood", &["Mumbai", "Delhi", "Hyderabad"]),
    ("Avengers 5", "Hollywood", &["Mumbai", "Kolkata", "Chennai"]),
    ("Pathaan", "Bollywood", &["Mumbai", "Delhi", "Agra"]),
    ("Jawan", "Bollywood", &["Mumbai", "Pune", "Bangalore"]),
    ("Gadar 3", "Bollywood", &["Delhi", "Varanasi", "Jaipur"]),
    ("KGF 3", "Sandalwood", &["Bangalore", "Mysore", "Davangere"]),
    ("Kantara 2", "Sandalwood", &["Mangalore", "Udupi", "Shimla"]),
    ("Sapta Sagarada 3", "Sandalwood", &["Bangalore", "Tumakuru", "Chikmagalur"]),
    ("RRR 2", "Tollywood", &["Hyderabad", "Chennai", "Bangalore"]),
    ("Pushpa 2", "Tollywood", &["Hyderabad", "Chennai", "Goa"]),
    ("Drishyam 3", "Mollywood", &["Kerala", "Bangalore", "Mumbai"]),
    ("Premalu", "Mollywood", &["Kerala", "Hyderabad", "Chennai"]),
];

const TRAVEL_TEMPLATES: &[(&str, &[&str])] = &[
    ("Goa", &[
        "Beach vibes in {name}! #travel #beach",
        "Sunset at {name} is breathtaking! #goa",
        "Party night in {name}! Best nightlife ever #travel",
        "Seafood in {name} is incredible! #foodie",
        "{name} never disappoints! #beachlife",
    ]),
    ("Manali", &[
        "Snowfall in {name} is magical! #mountains",
        "Paragliding in {name} - what a thrill! #adventure",
        "Trekking around {name} - best experience! #hiking",
        "{name} in winter is paradise! #snow",
    ]),
    ("Jaipur", &[
        "Royal palaces of {name} are mesmerizing! #heritage",
        "Hawa Mahal in {name} is an architectural marvel! #travel",
        "Shopping in {name} markets is a must! #pinkcity",
        "Traditional food in {name} is delicious! #foodie",
    ]),
    ("Kerala", &[
        "{name} backwaters are so peaceful! #travel",
        "Houseboat experience in {name} is amazing! #kerala",
        "Ayurveda retreat in {name} was transformative! #wellness",
    ]),
    ("Rishikesh", &[
        "River rafting in {name} - adrenaline rush! #adventure",
        "Yoga retreat in {name} was life-changing! #wellness",
        "Ganga Aarti in {name} is mesmerizing! #spiritual",
    ]),
    ("Mumbai", &[
        "{name} - the city that never sleeps! #mumbai",
        "Marine Drive in {name} at night is stunning! #travel",
        "Street food in {name} is unbeatable! #foodie",
    ]),
    ("Varanasi", &[
        "{name} ghats at sunrise - spiritual bliss! #travel",
        "Boat ride on the Ganges in {name} was peaceful! #spiritual",
        "Evening aarti in {name} is unforgettable! #spiritual",
    ]),
    ("Bangalore", &[
        "{name} weather is perfect! #nammabengaluru",
        "Cubbon Park in {name} is so peaceful! #nature",
        "Cafe hopping in {name} is amazing! #coffeecity",
    ]),
    ("Ladakh", &[
        "{name} landscapes are otherworldly! #adventure",
        "Pangong Lake in {name} is stunning! #travel",
        "Bike trip to {name} - dream come true! #roadtrip",
    ]),
    ("Agra", &[
        "Taj Mahal in {name} at sunrise - no words! #travel",
        "{name} Fort is equally impressive! #history",
    ]),
    ("Udaipur", &[
        "Lake Pichola in {name} at sunset is breathtaking! #travel",
        "City Palace in {name} is stunning! #rajasthan",
    ]),
    ("Shimla", &[
        "{name} in winter is magical! #himachal",
        "Toy train to {name} was nostalgic! #travel",
    ]),
    ("Mysore", &[
        "{name} Palace illumination is spectacular! #heritage",
        "{name} silk sarees are famous! #shopping",
    ]),
    ("Mangaluru", &[
        "Beaches in {name} are underrated! #karnataka",
        "Seafood in {name} is next level! #foodie",
    ]),
    ("Udupi", &[
        "Temple town {name} is so peaceful! #spiritual",
        "Udupi cuisine in {name} is a must-try! #foodtravel",
    ]),
    ("Hubli", &["Markets in {name} are always lively! #travel"]),
    ("Belagavi", &["Historic forts around {name} are worth visiting! #heritage"]),
    ("Davangere", &["{name} benne dosa is legendary! #foodie"]),
    ("Tumakuru", &["Road trips to {name} from Bangalore are fun! #weekend"]),
    ("Chikmagalur", &[
        "Coffee estates in {name} are stunning! #coffee",
        "Sunrise treks around {name} are unforgettable! #trekking",
    ]),
    ("Coorg", &["{name} is perfect for a weekend getaway! #coorg"]),
    ("Gokarna", &["Beaches in {name} are perfect for a quiet escape! #beach"]),
    ("Hampi", &["Ruins of {name} feel like an open-air museum! #heritage"]),
    ("Ooty", &[
        "{name} botanical gardens are beautiful! #tamilnadu",
        "Toy train in {name} is charming! #hillstation",
    ]),
    ("Darjeeling", &[
        "{name} tea gardens are stunning! #westbengal",
        "Tiger Hill sunrise from {name} is worth it! #travel",
    ]),
];

const PARTY_TEMPLATES: &[(&str, &[&str])] = &[
    ("BJP", &[
        "{name} announces new development projects for Karnataka #politics",
        "{name} holds massive rally in Bangalore #karnataka",
        "{name} promises infrastructure development #karnataka",
        "{name} announces new schemes for farmers #karnataka",
    ]),
    ("Congress", &[
        "{name} criticizes government policies #karnataka",
        "{name} promises 5 guarantees for voters #politics",
        "{name} announces free electricity scheme #politics",
        "{name} promises job creation for youth #politics",
    ]),
    ("JDS", &[
        "{name} focuses on rural development #karnataka",
        "{name} announces farmer loan waiver #politics",
        "{name} holds rally in Mandya #karnataka",
    ]),
    ("AAP", &[
        "{name} announces free water and electricity #karnataka",
        "{name} holds first major rally in Bangalore #karnataka",
        "{name} promises corruption-free governance #politics",
    ]),
];

const POLITICIAN_TEMPLATES: &[(&str, &[&str])] = &[
    ("Siddaramaiah", &[
        "{name} promises free electricity #congress",
        "{name} addresses rally in Mysore #politics",
    ]),
    ("DK Shivakumar", &[
        "{name} meets farmers #congress",
        "{name} promises infrastructure #karnataka",
    ]),
    ("BS Yediyurappa", &[
        "{name} comments on coalition politics #bjp",
        "{name} inaugurates hospital #karnataka",
    ]),
    ("Basavaraj Bommai", &[
        "{name} inaugurates metro line #bjp",
        "{name} meets startup founders #politics",
    ]),
    ("HD Kumaraswamy", &[
        "{name} meets farmers #jds",
        "{name} promises irrigation projects #politics",
    ]),
    ("HD Deve Gowda", &[
        "{name} speaks on farmer issues #karnataka",
        "{name} addresses party workers #politics",
    ]),
];

const SPORT_TEMPLATES: &[(&str, &[&str])] = &[
    ("Cricket", &[
        "What a match! India vs Australia {name} is intense! #cricket",
        "Virat Kohli century! Incredible innings #cricket #india",
        "Rohit Sharma's captaincy is brilliant #cricket #india",
        "MS Dhoni finishes it in style! #cricket #ipl",
    ]),
    ("Football", &[
        "ISL match was thrilling! Great goals #football #isl",
        "Sunil Chhetri legend! Another goal #football #captain",
        "{name} fever in Kolkata! Mohun Bagan vs East Bengal #football",
    ]),
    ("Kabaddi", &[
        "Pro {name} League is amazing! #kabaddi #pkl",
        "{name} raid was spectacular! #kabaddi #india",
    ]),
    ("Hockey", &[
        "Indian {name} team wins! Proud moment #hockey #india",
        "Olympic {name} dreams alive! #hockey #olympics",
    ]),
    ("Volleyball", &[
        "{name} championship underway! #volleyball #india",
        "Pro {name} League is exciting! #volleyball #pvl",
    ]),
    ("Chess", &[
        "Viswanathan Anand brilliance! #chess #india",
        "{name} Olympiad excitement! #chess #olympiad",
    ]),
];

const CINEMA_TEMPLATES: &[&str] = &[
    "Watching {movie} in {loc} tonight! #{industry}",
    "{movie} buzz in {loc} is unreal right now. #{industry}",
    "Debating {movie} with friends in {loc} - what a film! #{industry}",
    "{movie} shows almost full in {loc}. Hype is real. #{industry}",
    "Tickets for {movie} sold out in {loc}! #{industry}",
];
