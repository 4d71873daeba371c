//! Display names for ISO 639 language codes.

use tracing::debug;

/// English display name for an ISO 639-1 or 639-2 code.
fn display_name(primary: &str) -> Option<&'static str> {
    let name = match primary {
        "en" | "eng" => "English",
        "fr" | "fra" | "fre" => "French",
        "de" | "deu" | "ger" => "German",
        "es" | "spa" => "Spanish",
        "it" | "ita" => "Italian",
        "pt" | "por" => "Portuguese",
        "ru" | "rus" => "Russian",
        "ja" | "jpn" => "Japanese",
        "ko" | "kor" => "Korean",
        "zh" | "zho" | "chi" => "Chinese",
        "cmn" => "Mandarin Chinese",
        "yue" => "Cantonese",
        "ar" | "ara" => "Arabic",
        "hi" | "hin" => "Hindi",
        "tr" | "tur" => "Turkish",
        "pl" | "pol" => "Polish",
        "nl" | "nld" | "dut" => "Dutch",
        "sv" | "swe" => "Swedish",
        "no" | "nor" => "Norwegian",
        "nb" | "nob" => "Norwegian Bokmål",
        "nn" | "nno" => "Norwegian Nynorsk",
        "da" | "dan" => "Danish",
        "fi" | "fin" => "Finnish",
        "is" | "isl" | "ice" => "Icelandic",
        "cs" | "ces" | "cze" => "Czech",
        "sk" | "slk" | "slo" => "Slovak",
        "hu" | "hun" => "Hungarian",
        "ro" | "ron" | "rum" => "Romanian",
        "bg" | "bul" => "Bulgarian",
        "el" | "ell" | "gre" => "Greek",
        "he" | "heb" => "Hebrew",
        "th" | "tha" => "Thai",
        "vi" | "vie" => "Vietnamese",
        "id" | "ind" => "Indonesian",
        "ms" | "msa" | "may" => "Malay",
        "fil" | "tl" | "tgl" => "Filipino",
        "uk" | "ukr" => "Ukrainian",
        "hr" | "hrv" => "Croatian",
        "sr" | "srp" => "Serbian",
        "bs" | "bos" => "Bosnian",
        "sl" | "slv" => "Slovenian",
        "mk" | "mkd" | "mac" => "Macedonian",
        "sq" | "sqi" | "alb" => "Albanian",
        "lt" | "lit" => "Lithuanian",
        "lv" | "lav" => "Latvian",
        "et" | "est" => "Estonian",
        "ka" | "kat" | "geo" => "Georgian",
        "hy" | "hye" | "arm" => "Armenian",
        "bn" | "ben" => "Bangla",
        "ta" | "tam" => "Tamil",
        "te" | "tel" => "Telugu",
        "pa" | "pan" => "Punjabi",
        "mr" | "mar" => "Marathi",
        "gu" | "guj" => "Gujarati",
        "kn" | "kan" => "Kannada",
        "ml" | "mal" => "Malayalam",
        "fa" | "fas" | "per" => "Persian",
        "ur" | "urd" => "Urdu",
        "sw" | "swa" => "Swahili",
        "af" | "afr" => "Afrikaans",
        "ca" | "cat" => "Catalan",
        "eu" | "eus" | "baq" => "Basque",
        "gl" | "glg" => "Galician",
        "cy" | "cym" | "wel" => "Welsh",
        "ga" | "gle" => "Irish",
        "la" | "lat" => "Latin",
        _ => return None,
    };
    Some(name)
}

/// Resolve a language code to its English display name.
///
/// Region subtags are ignored (`en-US` and `pt_BR` resolve by their primary
/// subtag). Unknown or malformed codes resolve to an empty string so the
/// caller can prompt.
pub fn resolve(code: &str) -> String {
    let primary = code
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    let name = display_name(&primary).unwrap_or_default();
    if name.is_empty() {
        debug!(code, "unknown language code");
    }
    name.to_string()
}
