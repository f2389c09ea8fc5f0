use serde::Serialize;

/// When during the day a supplement is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
        }
    }
}

/// One trackable item. `id` is the stable join key used inside stored
/// records and never changes once shipped.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogItem {
    pub id: &'static str,
    pub name: &'static str,
    pub time: Option<TimeOfDay>,
}

const fn supp(id: &'static str, name: &'static str, time: TimeOfDay) -> CatalogItem {
    CatalogItem {
        id,
        name,
        time: Some(time),
    }
}

const fn exercise(id: &'static str, name: &'static str) -> CatalogItem {
    CatalogItem {
        id,
        name,
        time: None,
    }
}

pub const SUPPLEMENTS: &[CatalogItem] = &[
    supp("berberine_morning", "Berberine – Morning", TimeOfDay::Morning),
    supp("vitamin_d3", "Vitamin D3", TimeOfDay::Morning),
    supp("vitamin_k2", "Vitamin K2", TimeOfDay::Morning),
    supp("nr", "NR", TimeOfDay::Morning),
    supp("astaxanthin", "Astaxanthin", TimeOfDay::Morning),
    supp("metformin", "Metformin", TimeOfDay::Morning),
    supp(
        "berberine_afternoon",
        "Berberine – Afternoon",
        TimeOfDay::Afternoon,
    ),
    supp("vitamin_c", "Vitamin C", TimeOfDay::Afternoon),
    supp("multivitamin", "Multivitamin", TimeOfDay::Afternoon),
    supp("sugar_support", "Sugar Support", TimeOfDay::Afternoon),
    supp("omega_3", "Omega 3", TimeOfDay::Afternoon),
    supp("tmg", "TMG", TimeOfDay::Afternoon),
    supp("nac", "NAC", TimeOfDay::Evening),
    supp("magnesium", "Magnesium", TimeOfDay::Evening),
    supp("taurine", "Taurine", TimeOfDay::Evening),
    supp("collagen", "Collagen", TimeOfDay::Evening),
    supp("protein_powder", "Protein Powder 84g", TimeOfDay::Evening),
    supp("cinnamon", "Cinnamon", TimeOfDay::Evening),
    supp("apple_cider_vinegar", "Apple Cider Vinegar", TimeOfDay::Evening),
    supp("creatine", "Creatine 10g", TimeOfDay::Evening),
    supp("probiotic", "Probiotic", TimeOfDay::Evening),
    supp("ubiquinol", "Ubiquinol", TimeOfDay::Evening),
];

pub const EXERCISES: &[CatalogItem] = &[
    exercise("treadmill", "Half Hour Treadmill"),
    exercise("foot_exercise", "Foot Exercise"),
    exercise("shoulder_exercise", "Shoulder Exercise"),
    exercise("weight_training", "Weight Training"),
];

#[must_use]
pub fn supplement_name(id: &str) -> Option<&'static str> {
    SUPPLEMENTS.iter().find(|s| s.id == id).map(|s| s.name)
}

#[must_use]
pub fn exercise_name(id: &str) -> Option<&'static str> {
    EXERCISES.iter().find(|e| e.id == id).map(|e| e.name)
}

#[must_use]
pub fn is_supplement_id(id: &str) -> bool {
    SUPPLEMENTS.iter().any(|s| s.id == id)
}

#[must_use]
pub fn is_exercise_id(id: &str) -> bool {
    EXERCISES.iter().any(|e| e.id == id)
}
