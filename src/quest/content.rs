//! Fixed content tables The Handler draws from.
//!
//! Keyed tables are ordered slices rather than maps: category resolution takes
//! the first key contained in the player's input, so table order decides ties
//! (e.g. "downtown park" resolves to `park` for titles, never `downtown`).

use super::types::Difficulty;

/// A keyword-indexed table, resolved first-match in slice order.
pub type Keyed<T> = &'static [(&'static str, T)];

pub const DEFAULT_TIME_KEY: &str = "afternoon";
pub const DEFAULT_LOCATION_KEY: &str = "urban";
pub const DEFAULT_CONDITIONS_KEY: &str = "clear";
pub const DEFAULT_MOOD_KEY: &str = "adventurous";

pub const SIGN_OFF: &str = "— The Handler";

pub const CLOSING_INSTRUCTION: &str =
    "Your mission parameters are encrypted below. Decode them through direct experience.";

pub const TIME_THEMES: Keyed<&[&str]> = &[
    ("morning", &["Dawn", "First Light", "Awakening"]),
    ("afternoon", &["Meridian", "High Sun", "Zenith"]),
    ("evening", &["Twilight", "Dusk", "Threshold"]),
    ("night", &["Midnight", "Shadow", "Nocturne"]),
];

pub const LOCATION_THEMES: Keyed<&[&str]> = &[
    ("urban", &["Streets", "Labyrinth", "Nexus", "Grid"]),
    ("forest", &["Grove", "Wilds", "Canopy", "Path"]),
    ("suburban", &["Boundary", "Edge", "Periphery", "Quarter"]),
    ("park", &["Garden", "Commons", "Green", "Haven"]),
    ("downtown", &["Core", "Heart", "Center", "Hub"]),
];

/// Number of title layouts; see [`render_title`].
pub const TITLE_TEMPLATES: usize = 4;

/// Render title layout `template` (0-based, modulo [`TITLE_TEMPLATES`]).
pub fn render_title(template: usize, time_word: &str, location_word: &str) -> String {
    match template % TITLE_TEMPLATES {
        0 => format!("The {time_word} {location_word}"),
        1 => format!("Operation: {location_word} {time_word}"),
        2 => format!("{time_word} of the {location_word}"),
        _ => format!("The {location_word} Protocol"),
    }
}

pub const GREETINGS: &[&str] = &["Agent,", "Operative,", "Seeker,", "Wanderer,"];

pub const SIGNATURE_PHRASES: &[&str] = &[
    "The path reveals itself to those who dare to look.",
    "What seems ordinary conceals the extraordinary.",
    "Trust your instincts. Question everything.",
    "The world is more than it appears.",
    "Every shadow holds a secret.",
];

pub const TIME_CLAUSES: Keyed<&str> = &[
    ("morning", "as dawn breaks over the horizon"),
    ("afternoon", "while the sun reaches its apex"),
    ("evening", "as twilight descends upon us"),
    ("night", "under the cover of darkness"),
];

pub const CONDITION_CLAUSES: Keyed<&str> = &[
    ("sunny", "The light reveals all—or does it?"),
    ("rainy", "The rain washes away the mundane."),
    ("foggy", "The fog conceals more than geography."),
    ("snowy", "Each snowflake carries a secret."),
    ("cloudy", "The clouds mirror the mystery below."),
    ("clear", "Clarity of sky, obscurity of purpose."),
];

pub const MOOD_CLAUSES: Keyed<&str> = &[
    (
        "adventurous",
        "Your spirit of adventure will be tested in ways you cannot yet imagine.",
    ),
    (
        "contemplative",
        "This mission requires observation more than action. Watch. Listen. Understand.",
    ),
    (
        "energetic",
        "Channel that energy into purpose. Move with intention.",
    ),
    ("mysterious", "You seek mystery, and mystery has found you."),
    (
        "curious",
        "Your curiosity is both your greatest asset and potential liability.",
    ),
];

pub fn difficulty_clause(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Reconnaissance => {
            "This is a reconnaissance mission. Gather intelligence. Report findings."
        }
        Difficulty::Standard => "A standard operation, but do not mistake routine for safety.",
        Difficulty::Challenging => {
            "This mission exceeds normal parameters. Proceed with heightened awareness."
        }
        Difficulty::Legendary => "Only the most dedicated operatives receive such assignments.",
    }
}

pub const BASE_OBJECTIVES: &[&str] = &[
    "Identify three points of interest that others overlook",
    "Document the hidden patterns in your surroundings",
    "Make contact with an unexpected element",
    "Discover the story this place wants to tell",
    "Find evidence of change—something that was, is, or will be different",
];

pub const LOCATION_OBJECTIVES: Keyed<&[&str]> = &[
    (
        "urban",
        &[
            "Locate the oldest visible architectural detail",
            "Find three examples of nature reclaiming space",
            "Identify a gathering place for secrets",
        ],
    ),
    (
        "forest",
        &[
            "Discover signs of unseen wildlife",
            "Locate a natural landmark that serves as a waypoint",
            "Find evidence of seasonal transformation",
        ],
    ),
    (
        "suburban",
        &[
            "Identify the boundary between the ordinary and extraordinary",
            "Locate a space between destinations",
            "Document the personality of the neighborhood",
        ],
    ),
    (
        "park",
        &[
            "Find the heart of this green space",
            "Discover where people and nature intersect",
            "Locate the oldest living thing",
        ],
    ),
];

/// Side-intelligence draws never exceed this many hints.
pub const SIDE_INTELLIGENCE_DRAW: usize = 3;

pub const BASE_INTELLIGENCE: &[&str] = &[
    "Sometimes the most important discoveries happen between objectives.",
    "Pay attention to transitions—doorways, corners, edges, borders.",
    "What makes a sound? What should make a sound but doesn't?",
    "The Handler is always watching, but never where you expect.",
];

pub const CONDITION_INTELLIGENCE: Keyed<&str> = &[
    (
        "rainy",
        "Rain reveals textures usually hidden. Notice reflections.",
    ),
    ("foggy", "In fog, trust your other senses more than sight."),
    ("sunny", "Shadows tell their own stories. Follow them."),
    ("snowy", "Fresh snow is a canvas. What marks has life left?"),
];

pub const TIME_INTELLIGENCE: Keyed<&str> = &[
    ("morning", "Morning light is honest. What does it illuminate?"),
    (
        "evening",
        "Twilight is the hour of transformation. Be present for it.",
    ),
    ("night", "Darkness heightens awareness. What emerges?"),
];

/// Artifact draws never exceed this many pairs.
pub const ARTIFACT_DRAW: usize = 3;

pub const BASE_ARTIFACTS: &[(&str, &str)] = &[
    (
        "The Overlooked Detail",
        "Something everyone sees but no one notices",
    ),
    (
        "Echo of Purpose",
        "Evidence of this place's original or hidden function",
    ),
    ("Natural Intrusion", "Where the natural world asserts itself"),
    ("Human Trace", "A mark left by someone, intentional or not"),
    ("Temporal Marker", "Something that reveals the passage of time"),
];

pub const LOCATION_ARTIFACTS: Keyed<&[(&str, &str)]> = &[
    (
        "urban",
        &[
            ("Ghost Sign", "Faded advertising or signage from another era"),
            (
                "Unofficial Path",
                "A shortcut created by repeated human passage",
            ),
            ("Utility Poetry", "Infrastructure that's accidentally beautiful"),
        ],
    ),
    (
        "forest",
        &[
            ("Ancient One", "The oldest tree you can find"),
            ("Wildlife Gallery", "Signs of animal activity"),
            ("Stone Memory", "A rock formation with a story"),
        ],
    ),
    (
        "suburban",
        &[
            (
                "Garden Guardian",
                "Unexpected greenery in an unlikely place",
            ),
            ("Neighborhood Icon", "A landmark known only to locals"),
            ("Time Capsule", "Something preserved from an earlier decade"),
        ],
    ),
];
