//! Declarative field schema driving the form, classification and export.
//!
//! Every parameter the form knows about is one [`FieldSpec`] in [`SCHEMA`].
//! Form layout, range highlighting, the info panel and the summary export all
//! iterate this table; there is no second list to keep in sync.

use serde::{Deserialize, Serialize};

/// Stable parameter identifiers. Serialized names match the clinical report
/// keys (`femoralTorsion`, `tttgDistanceCT`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ParamKey {
    #[serde(rename = "mri")]
    Mri,
    #[serde(rename = "xrayEOS")]
    XrayEos,
    #[serde(rename = "femoralTorsion")]
    FemoralTorsion,
    #[serde(rename = "tibialTorsion")]
    TibialTorsion,
    #[serde(rename = "legLength")]
    LegLength,
    #[serde(rename = "legLengthDifference")]
    LegLengthDifference,
    #[serde(rename = "genuValgum")]
    GenuValgum,
    #[serde(rename = "patellaHeightInsallSalvati")]
    PatellaHeightInsallSalvati,
    #[serde(rename = "catonDeschampsIndex")]
    CatonDeschampsIndex,
    #[serde(rename = "patellaTrochleaIndex")]
    PatellaTrochleaIndex,
    #[serde(rename = "tttgDistanceCT")]
    TttgDistanceCt,
    #[serde(rename = "tttgDistanceMRI")]
    TttgDistanceMri,
    #[serde(rename = "tttgIndex")]
    TttgIndex,
    #[serde(rename = "ttpclDistance")]
    TtpclDistance,
    #[serde(rename = "patellaTilt")]
    PatellaTilt,
    #[serde(rename = "beightonPinky")]
    BeightonPinky,
    #[serde(rename = "beightonThumb")]
    BeightonThumb,
    #[serde(rename = "beightonElbow")]
    BeightonElbow,
    #[serde(rename = "beightonKnee")]
    BeightonKnee,
    #[serde(rename = "beightonTrunkFlexion")]
    BeightonTrunkFlexion,
    #[serde(rename = "beightonTotalScore")]
    BeightonTotalScore,
}

/// What kind of value a parameter holds and how it is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form decimal text, one value per side.
    NumericLr,
    /// Checkbox per side.
    BooleanLr,
    /// One checkbox for the whole parameter.
    BooleanSingle,
    /// Read-only computed value.
    DerivedSingle,
}

/// Form sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Imaging,
    Torsion,
    LengthAlignment,
    PatellaHeight,
    PatellarAlignment,
    Hypermobility,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Imaging => "Imaging",
            Section::Torsion => "Torsion",
            Section::LengthAlignment => "Length & Alignment",
            Section::PatellaHeight => "Patella Height",
            Section::PatellarAlignment => "Patellar Alignment",
            Section::Hypermobility => "Hypermobility (Beighton)",
        }
    }
}

/// One parameter: everything the form, classifier and export need to know.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: ParamKey,
    pub kind: FieldKind,
    pub section: Section,
    /// Short label shown next to the input.
    pub label: &'static str,
    /// Label used in the summary table (units spelled out).
    pub summary_label: &'static str,
    pub unit: &'static str,
    /// Reference range text shown next to the field and in the export.
    pub reference: &'static str,
    pub tooltip: &'static str,
}

/// The one canonical parameter table, in form and export order.
pub const SCHEMA: &[FieldSpec] = &[
    FieldSpec {
        key: ParamKey::Mri,
        kind: FieldKind::BooleanLr,
        section: Section::Imaging,
        label: "MRI Performed",
        summary_label: "MRI Performed",
        unit: "",
        reference: "-",
        tooltip: "Check if MRI was performed. Often used for soft tissues (MPFL, cartilage) \
                  and specific measurements like Patella-Trochlea Index.",
    },
    FieldSpec {
        key: ParamKey::XrayEos,
        kind: FieldKind::BooleanLr,
        section: Section::Imaging,
        label: "X-Ray/EOS Performed",
        summary_label: "X-Ray/EOS Performed",
        unit: "",
        reference: "-",
        tooltip: "Check if X-Ray or EOS was performed. Used for bone morphology, alignment, \
                  and height indices (e.g., Caton-Deschamps, Insall-Salvati).",
    },
    FieldSpec {
        key: ParamKey::FemoralTorsion,
        kind: FieldKind::NumericLr,
        section: Section::Torsion,
        label: "Femoral Torsion",
        summary_label: "Femoral Torsion (\u{b0})",
        unit: "\u{b0}",
        reference: "~15\u{b0} (Path >25-30\u{b0})",
        tooltip: "Femoral Torsion/Antetorsion (\u{b0}): Measures twist of the femur. Normal ~15\u{b0}. \
                  Pathological if >25-30\u{b0}. Measured via CT/MRI (e.g., Waidelich: Norm 20.4\u{b0} \u{b1} 9\u{b0}).",
    },
    FieldSpec {
        key: ParamKey::TibialTorsion,
        kind: FieldKind::NumericLr,
        section: Section::Torsion,
        label: "Tibial Torsion",
        summary_label: "Tibial Torsion (\u{b0})",
        unit: "\u{b0}",
        reference: "Norm Varies (Path >40\u{b0})",
        tooltip: "Tibial Torsion (\u{b0}): Measures twist of the tibia. External torsion >40\u{b0} can be \
                  significant. Measured via CT/MRI.",
    },
    FieldSpec {
        key: ParamKey::LegLength,
        kind: FieldKind::NumericLr,
        section: Section::LengthAlignment,
        label: "Leg Length",
        summary_label: "Leg Length (mm)",
        unit: "mm",
        reference: "N/A",
        tooltip: "Leg Length (mm): Typically measured on full-leg standing X-ray/EOS. The \
                  right-left difference is computed below.",
    },
    FieldSpec {
        key: ParamKey::LegLengthDifference,
        kind: FieldKind::DerivedSingle,
        section: Section::LengthAlignment,
        label: "Leg Length Difference",
        summary_label: "Leg Length Difference (mm)",
        unit: "mm",
        reference: "N/A",
        tooltip: "Computed as right minus left leg length, rounded to one decimal. Blank while \
                  either side is missing.",
    },
    FieldSpec {
        key: ParamKey::GenuValgum,
        kind: FieldKind::NumericLr,
        section: Section::LengthAlignment,
        label: "Genu Valgum",
        summary_label: "Genu Valgum (\u{b0})",
        unit: "\u{b0}",
        reference: "<7\u{b0} (approx)",
        tooltip: "Genu Valgum (\u{b0}): Valgus angle of the knee, measured on full-leg standing \
                  X-ray/EOS. Significant valgus is a risk factor (e.g., >7\u{b0}).",
    },
    FieldSpec {
        key: ParamKey::PatellaHeightInsallSalvati,
        kind: FieldKind::NumericLr,
        section: Section::PatellaHeight,
        label: "Insall-Salvati Index",
        summary_label: "Patella Height (Insall-Salvati)",
        unit: "",
        reference: "\u{2264}1.2",
        tooltip: "Insall-Salvati Index: Ratio of patellar tendon length to patella length on \
                  lateral X-ray. Normal \u{2264}1.2. >1.2 indicates Patella Alta.",
    },
    FieldSpec {
        key: ParamKey::CatonDeschampsIndex,
        kind: FieldKind::NumericLr,
        section: Section::PatellaHeight,
        label: "Caton-Deschamps Index",
        summary_label: "Patella Height (Caton-Deschamps)",
        unit: "",
        reference: "\u{2264}1.2 (Alta >1.3)",
        tooltip: "Caton-Deschamps Index: Ratio of distance from lower patellar pole to tibial \
                  plateau / patellar articular surface length on lateral X-ray. Normal \u{2264}1.2. \
                  >1.3 indicates Patella Alta requiring potential distalization.",
    },
    FieldSpec {
        key: ParamKey::PatellaTrochleaIndex,
        kind: FieldKind::NumericLr,
        section: Section::PatellaHeight,
        label: "Patella-Trochlea Index (PTI)",
        summary_label: "Patella-Trochlea Index (%)",
        unit: "%",
        reference: "\u{2265}12.5%",
        tooltip: "Patella-Trochlea Index (PTI - Biedert): Percentage of cartilage overlap on \
                  sagittal MRI. Normal \u{2265}12.5%. <12.5% associated with instability.",
    },
    FieldSpec {
        key: ParamKey::TttgDistanceCt,
        kind: FieldKind::NumericLr,
        section: Section::PatellarAlignment,
        label: "TT-TG Distance (CT)",
        summary_label: "TT-TG Distance (CT) (mm)",
        unit: "mm",
        reference: "\u{2264}20 mm",
        tooltip: "TT-TG Distance (CT) (mm): Distance between Tibial Tubercle and Trochlear \
                  Groove on axial CT. Normal \u{2264}20mm. Values >20mm are pathological.",
    },
    FieldSpec {
        key: ParamKey::TttgDistanceMri,
        kind: FieldKind::NumericLr,
        section: Section::PatellarAlignment,
        label: "TT-TG Distance (MRI)",
        summary_label: "TT-TG Distance (MRI) (mm)",
        unit: "mm",
        reference: "<15 mm (approx)",
        tooltip: "TT-TG Distance (MRI) (mm): Distance between Tibial Tubercle and Trochlear \
                  Groove on axial MRI (cartilage landmarks). Normal <8.7mm. Instability avg ~16.5mm.",
    },
    FieldSpec {
        key: ParamKey::TttgIndex,
        kind: FieldKind::NumericLr,
        section: Section::PatellarAlignment,
        label: "TT-TG Index",
        summary_label: "TT-TG Index",
        unit: "",
        reference: "<0.23",
        tooltip: "TT-TG Index: Ratio of TT-TG / TT-TE (Trochlear Entrance distance) on axial \
                  CT/MRI, adjusts for knee size. Normal <0.23. >0.23 is pathological.",
    },
    FieldSpec {
        key: ParamKey::TtpclDistance,
        kind: FieldKind::NumericLr,
        section: Section::PatellarAlignment,
        label: "TT-PCL Distance",
        summary_label: "TT-PCL Distance (mm)",
        unit: "mm",
        reference: "<24 mm",
        tooltip: "TT-PCL Distance (mm): Distance between Tibial Tubercle and medial border of \
                  PCL on axial CT/MRI. Helps differentiate tibial vs. trochlear cause of high TT-TG.",
    },
    FieldSpec {
        key: ParamKey::PatellaTilt,
        kind: FieldKind::NumericLr,
        section: Section::PatellarAlignment,
        label: "Patella Tilt",
        summary_label: "Patella Tilt (\u{b0})",
        unit: "\u{b0}",
        reference: "\u{2264}20\u{b0}",
        tooltip: "Patella Tilt (\u{b0}): Angle of patella relative to posterior condylar line on \
                  axial CT/MRI. Normal \u{2264}20\u{b0}. >20\u{b0} is a risk factor.",
    },
    FieldSpec {
        key: ParamKey::BeightonPinky,
        kind: FieldKind::BooleanLr,
        section: Section::Hypermobility,
        label: "Little Finger >90\u{b0}",
        summary_label: "Beighton: Little Finger >90\u{b0}",
        unit: "",
        reference: "1 pt/side",
        tooltip: "Passive dorsiflexion of the fifth metacarpophalangeal joint beyond 90\u{b0}. \
                  One Beighton point per side.",
    },
    FieldSpec {
        key: ParamKey::BeightonThumb,
        kind: FieldKind::BooleanLr,
        section: Section::Hypermobility,
        label: "Thumb to Forearm",
        summary_label: "Beighton: Thumb to Forearm",
        unit: "",
        reference: "1 pt/side",
        tooltip: "Passive apposition of the thumb to the flexor aspect of the forearm. One \
                  Beighton point per side.",
    },
    FieldSpec {
        key: ParamKey::BeightonElbow,
        kind: FieldKind::BooleanLr,
        section: Section::Hypermobility,
        label: "Elbow Hyperext >10\u{b0}",
        summary_label: "Beighton: Elbow Hyperext >10\u{b0}",
        unit: "",
        reference: "1 pt/side",
        tooltip: "Elbow hyperextension beyond 10\u{b0}. One Beighton point per side.",
    },
    FieldSpec {
        key: ParamKey::BeightonKnee,
        kind: FieldKind::BooleanLr,
        section: Section::Hypermobility,
        label: "Knee Hyperext >10\u{b0}",
        summary_label: "Beighton: Knee Hyperext >10\u{b0}",
        unit: "",
        reference: "1 pt/side",
        tooltip: "Knee hyperextension beyond 10\u{b0}. One Beighton point per side.",
    },
    FieldSpec {
        key: ParamKey::BeightonTrunkFlexion,
        kind: FieldKind::BooleanSingle,
        section: Section::Hypermobility,
        label: "Trunk Flexion (Palms Flat)",
        summary_label: "Beighton: Trunk Flexion (Palms Flat)",
        unit: "",
        reference: "1 pt",
        tooltip: "Forward flexion of the trunk with knees extended, palms resting flat on the \
                  floor. One Beighton point.",
    },
    FieldSpec {
        key: ParamKey::BeightonTotalScore,
        kind: FieldKind::DerivedSingle,
        section: Section::Hypermobility,
        label: "Beighton Score",
        summary_label: "Beighton Score (0-9)",
        unit: "",
        reference: "<5 (0-9)",
        tooltip: "Sum of the nine Beighton items (four bilateral tests plus trunk flexion). \
                  Scores of 5 or more suggest generalized joint hypermobility.",
    },
];

/// The nine boolean contributions to the Beighton total: four bilateral
/// tests and the single trunk flexion item.
pub const BEIGHTON_PAIRED: [ParamKey; 4] = [
    ParamKey::BeightonPinky,
    ParamKey::BeightonThumb,
    ParamKey::BeightonElbow,
    ParamKey::BeightonKnee,
];

pub const BEIGHTON_SINGLE: ParamKey = ParamKey::BeightonTrunkFlexion;

pub fn spec_for(key: ParamKey) -> &'static FieldSpec {
    SCHEMA
        .iter()
        .find(|spec| spec.key == key)
        .expect("every ParamKey has a schema entry")
}

impl ParamKey {
    /// The serialized (report) name, e.g. `femoralTorsion`.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKey::Mri => "mri",
            ParamKey::XrayEos => "xrayEOS",
            ParamKey::FemoralTorsion => "femoralTorsion",
            ParamKey::TibialTorsion => "tibialTorsion",
            ParamKey::LegLength => "legLength",
            ParamKey::LegLengthDifference => "legLengthDifference",
            ParamKey::GenuValgum => "genuValgum",
            ParamKey::PatellaHeightInsallSalvati => "patellaHeightInsallSalvati",
            ParamKey::CatonDeschampsIndex => "catonDeschampsIndex",
            ParamKey::PatellaTrochleaIndex => "patellaTrochleaIndex",
            ParamKey::TttgDistanceCt => "tttgDistanceCT",
            ParamKey::TttgDistanceMri => "tttgDistanceMRI",
            ParamKey::TttgIndex => "tttgIndex",
            ParamKey::TtpclDistance => "ttpclDistance",
            ParamKey::PatellaTilt => "patellaTilt",
            ParamKey::BeightonPinky => "beightonPinky",
            ParamKey::BeightonThumb => "beightonThumb",
            ParamKey::BeightonElbow => "beightonElbow",
            ParamKey::BeightonKnee => "beightonKnee",
            ParamKey::BeightonTrunkFlexion => "beightonTrunkFlexion",
            ParamKey::BeightonTotalScore => "beightonTotalScore",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_exactly_one_entry() {
        for spec in SCHEMA {
            let count = SCHEMA.iter().filter(|s| s.key == spec.key).count();
            assert_eq!(count, 1, "duplicate schema entry for {:?}", spec.key);
        }
    }

    #[test]
    fn test_spec_for_covers_all_schema_keys() {
        for spec in SCHEMA {
            assert_eq!(spec_for(spec.key).key, spec.key);
        }
    }

    #[test]
    fn test_beighton_items_are_boolean() {
        for key in BEIGHTON_PAIRED {
            assert_eq!(spec_for(key).kind, FieldKind::BooleanLr);
        }
        assert_eq!(spec_for(BEIGHTON_SINGLE).kind, FieldKind::BooleanSingle);
    }

    #[test]
    fn test_derived_fields_present() {
        assert_eq!(
            spec_for(ParamKey::LegLengthDifference).kind,
            FieldKind::DerivedSingle
        );
        assert_eq!(
            spec_for(ParamKey::BeightonTotalScore).kind,
            FieldKind::DerivedSingle
        );
    }

    #[test]
    fn test_serialized_names_match_as_str() {
        for spec in SCHEMA {
            let json = serde_json::to_string(&spec.key).unwrap();
            assert_eq!(json, format!("\"{}\"", spec.key.as_str()));
        }
    }

    #[test]
    fn test_sections_are_grouped_contiguously() {
        // The form renders sections as contiguous runs of the schema.
        let mut seen = Vec::new();
        for spec in SCHEMA {
            if seen.last() != Some(&spec.section) {
                assert!(
                    !seen.contains(&spec.section),
                    "section {:?} appears in two runs",
                    spec.section
                );
                seen.push(spec.section);
            }
        }
    }
}
