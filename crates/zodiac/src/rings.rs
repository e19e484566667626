//! Static ring definitions, outermost first.

use crate::angle::{FULL_CIRCLE, normalize_degree};
use serde::Serialize;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, EnumIter, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RingId {
    House,
    Sign,
    Mansion,
    Scale,
}

impl RingId {
    pub fn spec(self) -> &'static RingSpec {
        match self {
            Self::House => &HOUSE_RING,
            Self::Sign => &SIGN_RING,
            Self::Mansion => &MANSION_RING,
            Self::Scale => &SCALE_RING,
        }
    }

    /// Houses stay fixed to the observer; every other ring turns with the ascendant.
    pub fn rotates(self) -> bool {
        self != Self::House
    }
}

#[derive(Debug)]
pub struct RingSpec {
    pub id: RingId,
    pub segment_count: usize,
    pub segment_size_deg: f64,
    pub outer_radius_frac: f64,
    pub inner_radius_frac: f64,
    pub labels: &'static [&'static str],
}

impl RingSpec {
    pub fn segment_start_deg(&self, index: usize) -> f64 {
        index as f64 * FULL_CIRCLE / self.segment_count as f64
    }

    pub fn segment_end_deg(&self, index: usize) -> f64 {
        self.segment_start_deg(index + 1)
    }

    pub fn segment_mid_deg(&self, index: usize) -> f64 {
        (self.segment_start_deg(index) + self.segment_end_deg(index)) / 2.0
    }

    pub fn label(&self, index: usize) -> &'static str {
        self.labels[index % self.segment_count]
    }

    /// Text drawn inside a segment. The scale ring is too narrow for names and
    /// carries an ordinal on every second segment instead.
    pub fn display_label(&self, index: usize) -> Option<String> {
        match self.id {
            RingId::Scale => (index % 2 == 0).then(|| (index + 1).to_string()),
            _ => Some(self.label(index).to_string()),
        }
    }
}

/// `floor(deg / segment_size) mod count`, evaluated as `deg * count / 360` so
/// boundaries such as 40° in the mansion ring land exactly.
pub fn segment_index_for(longitude_deg: f64, ring: &RingSpec) -> usize {
    let deg = normalize_degree(longitude_deg);
    let index = (deg * ring.segment_count as f64 / FULL_CIRCLE).floor() as usize;
    index % ring.segment_count
}

pub static RINGS: [&RingSpec; 4] = [&HOUSE_RING, &SIGN_RING, &MANSION_RING, &SCALE_RING];

pub static HOUSE_RING: RingSpec = RingSpec {
    id: RingId::House,
    segment_count: 12,
    segment_size_deg: FULL_CIRCLE / 12.0,
    outer_radius_frac: 0.99,
    inner_radius_frac: 0.9,
    labels: &HOUSES,
};

pub static SIGN_RING: RingSpec = RingSpec {
    id: RingId::Sign,
    segment_count: 12,
    segment_size_deg: FULL_CIRCLE / 12.0,
    outer_radius_frac: 0.9,
    inner_radius_frac: 0.8,
    labels: &SIGNS,
};

pub static MANSION_RING: RingSpec = RingSpec {
    id: RingId::Mansion,
    segment_count: 27,
    segment_size_deg: FULL_CIRCLE / 27.0,
    outer_radius_frac: 0.8,
    inner_radius_frac: 0.7,
    labels: &MANSIONS,
};

pub static SCALE_RING: RingSpec = RingSpec {
    id: RingId::Scale,
    segment_count: 72,
    segment_size_deg: FULL_CIRCLE / 72.0,
    outer_radius_frac: 0.7,
    inner_radius_frac: 0.61,
    labels: &SCALES,
};

pub const HOUSES: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

pub const SIGNS: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

pub const MANSIONS: [&str; 27] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashira",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "P. Phalguni",
    "U. Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "P. Ashadha",
    "U. Ashadha",
    "Shravana",
    "Dhanishta",
    "Shatabhisha",
    "P. Bhadra",
    "U. Bhadra",
    "Revati",
];

/// The 72 melakarta ragas in canonical order.
pub const SCALES: [&str; 72] = [
    "Kanakangi",
    "Ratnangi",
    "Ganamurti",
    "Vanaspati",
    "Manavati",
    "Tanarupi",
    "Senavati",
    "Hanumatodi",
    "Dhenuka",
    "Natakapriya",
    "Kokilapriya",
    "Rupavati",
    "Gayakapriya",
    "Vakulabharanam",
    "Mayamalavagowla",
    "Chakravakam",
    "Suryakantam",
    "Hatakambari",
    "Jhankaradhvani",
    "Natabhairavi",
    "Keeravani",
    "Kharaharapriya",
    "Gourimanohari",
    "Varunapriya",
    "Mararanjani",
    "Charukesi",
    "Sarasangi",
    "Harikambhoji",
    "Dheerasankarabharanam",
    "Naganandini",
    "Yagapriya",
    "Ragavardhani",
    "Gangeyabhushani",
    "Vagadheeswari",
    "Sulini",
    "Chalanata",
    "Salagam",
    "Jalarnavam",
    "Jhalavarali",
    "Navaneetam",
    "Pavani",
    "Raghupriya",
    "Gavambhodi",
    "Bhavapriya",
    "Shubhapantuvarali",
    "Shadvidamargini",
    "Suvarnangi",
    "Divyamani",
    "Dhavalambari",
    "Namanarayani",
    "Kamavardhani",
    "Ramapriya",
    "Gamanashrama",
    "Viswambhari",
    "Shyamalangi",
    "Shanmukhapriya",
    "Simhendramadhyamam",
    "Hemavati",
    "Dharmavati",
    "Neetimati",
    "Kantamani",
    "Rishabhapriya",
    "Latangi",
    "Vachaspati",
    "Mechakalyani",
    "Chitrambari",
    "Sucharitra",
    "Jyotiswarupini",
    "Dhatuvardhani",
    "Nasikabhushani",
    "Kosalam",
    "Rasikapriya",
];
