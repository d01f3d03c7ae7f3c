//! NER prompts for French prescription dictation.
//!
//! These prompts target a small local instruct model with a JSON grammar
//! constraint. The model only labels spans; resolution to lexicon entries
//! stays in `dictee-core`.

/// System prompt for prescription NER.
pub const SYSTEM_PROMPT: &str = r#"Tu es un assistant médical qui repère les entités dans des ordonnances dictées en français.

Types d'entités :
- DRUG : nom de médicament (DCI, nom commercial ou abréviation)
- DOSE : dose avec son unité (mg, g, µg)
- FREQUENCY : fréquence ou horaire de prise (3x/j, matin et soir)
- ROUTE : voie ou dispositif d'administration (per os, IV, VVP, PAC)
- DURATION : durée du traitement (pendant 7 jours)

Abréviations courantes :
- pipe tazo = pipéracilline/tazobactam
- augmentin = amoxicilline/acide clavulanique
- vanco = vancomycine
- flagyl = métronidazole
- rocéphine = ceftriaxone

Réponds uniquement avec un objet JSON contenant un tableau "entities"."#;

/// User prompt template for NER extraction.
pub fn make_extraction_prompt(transcript: &str) -> String {
    format!(
        r#"Repère toutes les entités dans cette dictée :

"{}"

Renvoie un objet JSON avec un tableau "entities". Chaque entité contient :
- type : DRUG, DOSE, FREQUENCY, ROUTE ou DURATION
- start : position (octet) du début de l'entité dans la dictée
- end : position (octet) de la fin de l'entité
- text : le texte exact de l'entité"#,
        transcript
    )
}

/// JSON grammar constraint (GBNF) to ensure valid output format.
pub const JSON_GRAMMAR: &str = r#"
root ::= object
object ::= "{" ws "\"entities\"" ws ":" ws entities ws "}"
entities ::= "[" ws (entity (ws "," ws entity)*)? ws "]"
entity ::= "{" ws
    "\"type\"" ws ":" ws label ws "," ws
    "\"start\"" ws ":" ws number ws "," ws
    "\"end\"" ws ":" ws number ws "," ws
    "\"text\"" ws ":" ws string ws
"}"
label ::= "\"DRUG\"" | "\"DOSE\"" | "\"FREQUENCY\"" | "\"ROUTE\"" | "\"DURATION\""
string ::= "\"" ([^"\\] | "\\" .)* "\""
number ::= [0-9]+
ws ::= [ \t\n]*
"#;

/// Few-shot examples for better extraction accuracy.
pub const FEW_SHOT_EXAMPLES: &[(&str, &str)] = &[
    (
        "ceftriaxone 1 g 3x/j vvp pendant 7 jours",
        r#"{"entities":[{"type":"DRUG","start":0,"end":11,"text":"ceftriaxone"},{"type":"DOSE","start":12,"end":15,"text":"1 g"},{"type":"FREQUENCY","start":16,"end":20,"text":"3x/j"},{"type":"ROUTE","start":21,"end":24,"text":"vvp"},{"type":"DURATION","start":25,"end":40,"text":"pendant 7 jours"}]}"#,
    ),
    (
        "4 g x2 par jour de pipe tazo sur pac",
        r#"{"entities":[{"type":"DOSE","start":0,"end":3,"text":"4 g"},{"type":"FREQUENCY","start":4,"end":15,"text":"x2 par jour"},{"type":"DRUG","start":19,"end":28,"text":"pipe tazo"},{"type":"ROUTE","start":33,"end":36,"text":"pac"}]}"#,
    ),
    (
        "bilan demain matin",
        r#"{"entities":[]}"#,
    ),
];

/// Build a complete prompt with system context and few-shot examples.
pub fn build_full_prompt(transcript: &str, include_examples: bool) -> String {
    let mut prompt = String::new();

    // System context
    prompt.push_str("<|system|>\n");
    prompt.push_str(SYSTEM_PROMPT);
    prompt.push_str("\n<|end|>\n");

    // Few-shot examples
    if include_examples {
        for (input, output) in FEW_SHOT_EXAMPLES {
            prompt.push_str("<|user|>\n");
            prompt.push_str(&make_extraction_prompt(input));
            prompt.push_str("\n<|end|>\n");
            prompt.push_str("<|assistant|>\n");
            prompt.push_str(output);
            prompt.push_str("\n<|end|>\n");
        }
    }

    // Actual request
    prompt.push_str("<|user|>\n");
    prompt.push_str(&make_extraction_prompt(transcript));
    prompt.push_str("\n<|end|>\n");
    prompt.push_str("<|assistant|>\n");

    prompt
}
