//! Random adjective-noun names for databases created without one

use rand::Rng as _;

const ADJECTIVES: &[&str] = &[
    "amazing", "brave", "calm", "clever", "cosmic", "daring", "eager", "fancy", "gentle",
    "glowing", "happy", "humble", "jolly", "keen", "lively", "lucky", "mellow", "mighty", "nimble",
    "noble", "patient", "polite", "proud", "quick", "quiet", "rapid", "shiny", "smart", "snappy",
    "solid", "sunny", "swift", "tidy", "vivid", "witty", "zesty",
];

const NOUNS: &[&str] = &[
    "badger", "beacon", "bison", "comet", "condor", "cougar", "falcon", "ferret", "gecko",
    "glacier", "harbor", "heron", "ibis", "jaguar", "koala", "lynx", "meteor", "nebula", "otter",
    "owl", "panther", "pelican", "puma", "quasar", "raven", "salmon", "sparrow", "tiger", "toucan",
    "walrus", "wombat", "yak",
];

/// Generate a name like `brave-otter`
pub fn generate() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{}-{}", adjective, noun)
}
