//! Curated hospital drug table.
//!
//! Order matters: an entry whose alias contains another entry's alias must be
//! declared first (levofloxacine before ofloxacine, the amoxicilline
//! association before amoxicilline alone).

use super::DrugEntry;

pub(super) fn entries() -> Vec<DrugEntry> {
    vec![
        DrugEntry::new(
            "Piperacilline + Tazobactam",
            "piperacilline/tazobactam",
            &[
                "piperacilline tazobactam",
                "piperacilline-tazobactam",
                "piperacilline tazo",
                "pipe tazo",
                "tazocilline",
                "tazocylline",
            ],
        ),
        DrugEntry::new(
            "Amoxicilline + Acide clavulanique",
            "amoxicilline/acide clavulanique",
            &[
                "amoxicilline acide clavulanique",
                "amoxicilline clavulanate",
                "amoxiclav",
                "augmentin",
            ],
        ),
        DrugEntry::new(
            "Amoxicilline",
            "amoxicilline",
            &["amoxicilline", "amoxycilline", "clamoxyl"],
        ),
        DrugEntry::new(
            "Ceftriaxone",
            "ceftriaxone",
            &["ceftriaxone", "ceftriaxon", "rocephine", "rocéphine"],
        ),
        DrugEntry::new("Cefotaxime", "cefotaxime", &["cefotaxime", "céfotaxime", "claforan"]),
        DrugEntry::new("Ceftazidime", "ceftazidime", &["ceftazidime", "fortum"]),
        DrugEntry::new("Cefepime", "cefepime", &["cefepime", "céfépime", "axepim"]),
        DrugEntry::new("Cefazoline", "cefazoline", &["cefazoline", "céfazoline"]),
        DrugEntry::new("Meropeneme", "meropeneme", &["meropeneme", "méropénème", "meronem"]),
        DrugEntry::new(
            "Imipeneme + Cilastatine",
            "imipeneme/cilastatine",
            &["imipeneme", "imipénème", "tienam"],
        ),
        DrugEntry::new("Ertapeneme", "ertapeneme", &["ertapeneme", "ertapénème", "invanz"]),
        DrugEntry::new(
            "Gentamicine",
            "gentamicine",
            &["gentamicine", "gentamycine", "gentalline"],
        ),
        DrugEntry::new("Amikacine", "amikacine", &["amikacine", "amiklin"]),
        DrugEntry::new("Vancomycine", "vancomycine", &["vancomycine", "vanco"]),
        DrugEntry::new("Teicoplanine", "teicoplanine", &["teicoplanine", "targocid"]),
        DrugEntry::new("Linezolide", "linezolide", &["linezolide", "linezolid", "zyvoxid"]),
        DrugEntry::new("Daptomycine", "daptomycine", &["daptomycine", "cubicin"]),
        DrugEntry::new(
            "Metronidazole",
            "metronidazole",
            &["metronidazole", "métronidazole", "flagyl"],
        ),
        DrugEntry::new("Clindamycine", "clindamycine", &["clindamycine", "dalacine"]),
        DrugEntry::new(
            "Sulfaméthoxazole + Triméthoprime",
            "sulfamethoxazole/trimethoprime",
            &[
                "sulfamethoxazole trimethoprime",
                "cotrimoxazole",
                "bactrim",
            ],
        ),
        DrugEntry::new(
            "Ciprofloxacine",
            "ciprofloxacine",
            &["ciprofloxacine", "ciflox"],
        ),
        DrugEntry::new(
            "Levofloxacine",
            "levofloxacine",
            &["levofloxacine", "lévofloxacine", "tavanic"],
        ),
        DrugEntry::new("Ofloxacine", "ofloxacine", &["ofloxacine", "oflocet"]),
        DrugEntry::new("Rifampicine", "rifampicine", &["rifampicine", "rifadine"]),
        DrugEntry::new("Cloxacilline", "cloxacilline", &["cloxacilline", "orbenine"]),
        DrugEntry::new("Doxycycline", "doxycycline", &["doxycycline", "vibramycine"]),
        DrugEntry::new("Azithromycine", "azithromycine", &["azithromycine", "zithromax"]),
        DrugEntry::new("Fosfomycine", "fosfomycine", &["fosfomycine", "monuril"]),
        DrugEntry::new("Colistine", "colistine", &["colistine", "colimycine"]),
        DrugEntry::new("Fluconazole", "fluconazole", &["fluconazole", "triflucan"]),
        DrugEntry::new("Aciclovir", "aciclovir", &["aciclovir", "zovirax"]),
        DrugEntry::new("Enoxaparine", "enoxaparine", &["enoxaparine", "lovenox"]),
        DrugEntry::new(
            "Paracétamol",
            "paracetamol",
            &["paracetamol", "paracétamol", "doliprane", "dafalgan", "efferalgan"],
        ),
    ]
}
