//! HCPCS procedure code descriptions
//!
//! Covers the codes that appear in the top-spending, COVID, specialty-drug
//! and fast-growth tables. Anything else renders as the bare code.

const HCPCS_DESCRIPTIONS: &[(&str, &str)] = &[
    ("T1019", "Personal care services, per 15 min"),
    ("T1015", "Clinic visit/encounter, all-inclusive"),
    ("T2016", "Habilitation, residential, waiver; per diem"),
    ("99213", "Office/outpatient visit, est. patient, low-mod complexity"),
    ("S5125", "Attendant care services, per 15 min"),
    ("99214", "Office/outpatient visit, est. patient, mod-high complexity"),
    ("99284", "Emergency dept visit, high complexity"),
    ("H2016", "Comprehensive community support services, per 15 min"),
    ("99283", "Emergency dept visit, moderate complexity"),
    ("H2015", "Comprehensive community support services, per 15 min"),
    ("99285", "Emergency dept visit, high/urgent complexity"),
    ("90837", "Psychotherapy, 60 minutes"),
    ("S5102", "Day care services, adult; per 15 min"),
    ("90834", "Psychotherapy, 45 minutes"),
    ("T2021", "Day habilitation, waiver; per 15 min"),
    ("H2017", "Psychosocial rehabilitation services, per 15 min"),
    ("T1017", "Targeted case management, per 15 min"),
    ("T1020", "Personal care services, per diem"),
    ("90999", "Unlisted dialysis procedure"),
    ("A0427", "Ambulance, ALS emergency transport Level 1"),
    ("92507", "Speech/hearing/language treatment"),
    ("H2019", "Therapeutic behavioral services, per 15 min"),
    ("T2033", "Residential care, NOS; per diem"),
    ("T1000", "Private duty/independent nursing service(s)"),
    ("H2014", "Skills training & development, per 15 min"),
    ("H0004", "Behavioral health counseling & therapy, per 15 min"),
    ("S5140", "Foster care, adult; per diem"),
    ("H0020", "Alcohol/drug services; methadone administration"),
    ("97530", "Therapeutic activities, each 15 min"),
    ("A0429", "Ambulance, BLS emergency transport"),
    ("H0019", "Behavioral health; residential, per diem"),
    ("T1040", "Medicaid certified CCBHC services"),
    ("99509", "Home visit, assistance w/ ADLs"),
    ("00003", "Anesthesia services"),
    ("T2023", "Community transition, waiver; per service"),
    ("T1016", "Case management, each 15 min"),
    ("97153", "Adaptive behavior treatment by protocol, per 15 min"),
    ("97110", "Therapeutic exercises, each 15 min"),
    ("S9124", "Nursing care, in the home; per hour"),
    ("S5130", "Homemaker service, NOS; per 15 min"),
    ("H2036", "Alcohol/drug treatment, per hour"),
    ("T2031", "Waiver services, not otherwise specified"),
    ("H0036", "Community psychiatric supportive treatment, per 15 min"),
    ("G0463", "Hospital outpatient clinic visit"),
    ("S5126", "Attendant care services, per diem"),
    ("H0018", "Behavioral health; short-term residential, per diem"),
    ("T2046", "Habilitation, residential, waiver; per month"),
    ("U0003", "Infectious disease detection (COVID-19)"),
    ("A0100", "Non-emergency transportation; per trip"),
    ("H2022", "Community-based wrap-around services, per diem"),
    ("A0110", "Non-emergency taxi transport"),
    ("A0120", "Non-emergency mini-bus transport"),
    ("A0434", "Ambulance, specialty care transport"),
    ("T1021", "Home health aide visit, per 15 min"),
    ("S5110", "Home care training, family; per 15 min"),
    ("H0044", "Supported housing, per diem"),
    ("H2010", "Comprehensive medication services, per 15 min"),
    ("T2003", "Non-emergency transport; encounter/trip"),
    ("T2017", "Habilitation, residential, waiver; 15 min"),
    ("T1024", "Evaluation & treatment, integrated specialty team"),
    ("T2028", "Specialized supply, NOS; per unit"),
    ("T2040", "Financial management, self-directed; per month"),
    ("T1028", "Assessment of home, physical & family environments"),
    ("K0606", "Automated external defibrillator"),
    ("99211", "Office/outpatient visit, minimal complexity"),
    ("99212", "Office/outpatient visit, low complexity"),
    ("99215", "Office/outpatient visit, high complexity"),
    ("99282", "Emergency dept visit, low complexity"),
    ("99281", "Emergency dept visit, minimal complexity"),
    ("90832", "Psychotherapy, 30 minutes"),
    ("90847", "Family psychotherapy with patient, 50 min"),
    ("90846", "Family psychotherapy without patient, 50 min"),
    ("96372", "Therapeutic injection, subcutaneous/intramuscular"),
    ("99202", "Office/outpatient visit, new patient, low complexity"),
    ("99203", "Office/outpatient visit, new patient, low-mod complexity"),
    ("99204", "Office/outpatient visit, new patient, mod-high complexity"),
    ("99205", "Office/outpatient visit, new patient, high complexity"),
    ("87635", "COVID-19 SARS-CoV-2 amplified probe detection"),
    ("91300", "COVID-19 vaccine (Pfizer), first dose"),
    ("91301", "COVID-19 vaccine (Moderna), first dose"),
    ("91302", "COVID-19 vaccine (AstraZeneca), first dose"),
    ("91303", "COVID-19 vaccine (J&J/Janssen), single dose"),
    ("0001A", "COVID-19 vaccine admin, Pfizer, 1st dose"),
    ("0002A", "COVID-19 vaccine admin, Pfizer, 2nd dose"),
    ("0003A", "COVID-19 vaccine admin, Pfizer, 3rd dose"),
    ("0011A", "COVID-19 vaccine admin, Moderna, 1st dose"),
    ("0012A", "COVID-19 vaccine admin, Moderna, 2nd dose"),
    ("0031A", "COVID-19 vaccine admin, J&J, single dose"),
    ("J2326", "Nusinersen (Spinraza), 12 mg intrathecal injection"),
    ("J1426", "Casimersen (Amondys 45) injection, 10 mg"),
    ("J7170", "Emicizumab-kxwh (Hemlibra) injection, 0.5 mg"),
    ("J1428", "Eteplirsen (Exondys 51) injection, 10 mg"),
    ("J7175", "Factor X (human), per IU"),
    ("J0219", "Atezolizumab (Tecentriq) injection, 10 mg"),
    ("J1303", "Ravulizumab (Ultomiris) injection, 10 mg"),
    ("J3032", "Voretigene neparvovec (Luxturna) injection"),
    ("J0179", "Avelumab (Bavencio) injection, 10 mg"),
    ("J9299", "Nivolumab (Opdivo) injection, 1 mg"),
    ("J0222", "Patisiran (Onpattro) injection, 0.1 mg"),
    ("J2350", "Ocrelizumab (Ocrevus) injection, 1 mg"),
    ("S5121", "Attendant care services, in-home, per 15 min"),
    ("W1793", "State-defined waiver service"),
    ("S9977", "Home infusion therapy, unspecified"),
    ("81416", "Exome sequence analysis"),
    ("D2740", "Crown, porcelain/ceramic substrate"),
    ("97151", "Behavior identification assessment"),
    ("97154", "Group adaptive behavior treatment, per 15 min"),
    ("0128", "Insertion of brain-computer interface"),
];

/// Short description for a code, or an empty string when unknown
#[must_use]
pub fn description(code: &str) -> &'static str {
    HCPCS_DESCRIPTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or("", |(_, desc)| *desc)
}

/// `CODE`, an em-dash, then the description; the bare code when the description is unknown
#[must_use]
pub fn label(code: &str) -> String {
    match description(code) {
        "" => code.to_string(),
        desc => format!("{code} \u{2014} {desc}"),
    }
}
