//! Compiled-in locale display-name tables

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;

use super::LocaleProvider;

/// English display names for common countries, languages and locale tags.
/// Deliberately compact; swap in another [`LocaleProvider`] for full CLDR
/// coverage.
const LOCALE_TABLES: &str = r#"
[countries]
AD = "Andorra"
AE = "United Arab Emirates"
AF = "Afghanistan"
AL = "Albania"
AM = "Armenia"
AR = "Argentina"
AT = "Austria"
AU = "Australia"
BA = "Bosnia and Herzegovina"
BD = "Bangladesh"
BE = "Belgium"
BG = "Bulgaria"
BR = "Brazil"
CA = "Canada"
CH = "Switzerland"
CL = "Chile"
CN = "China"
CO = "Colombia"
CZ = "Czechia"
DE = "Germany"
DK = "Denmark"
DZ = "Algeria"
EC = "Ecuador"
EE = "Estonia"
EG = "Egypt"
ES = "Spain"
FI = "Finland"
FR = "France"
GB = "United Kingdom"
GE = "Georgia"
GR = "Greece"
HR = "Croatia"
HU = "Hungary"
ID = "Indonesia"
IE = "Ireland"
IL = "Israel"
IN = "India"
IS = "Iceland"
IT = "Italy"
JO = "Jordan"
JP = "Japan"
KE = "Kenya"
KR = "South Korea"
KW = "Kuwait"
KZ = "Kazakhstan"
LB = "Lebanon"
LI = "Liechtenstein"
LK = "Sri Lanka"
LT = "Lithuania"
LU = "Luxembourg"
LV = "Latvia"
MA = "Morocco"
MC = "Monaco"
MD = "Moldova"
ME = "Montenegro"
MK = "North Macedonia"
MT = "Malta"
MX = "Mexico"
MY = "Malaysia"
NG = "Nigeria"
NL = "Netherlands"
NO = "Norway"
NZ = "New Zealand"
PE = "Peru"
PH = "Philippines"
PK = "Pakistan"
PL = "Poland"
PT = "Portugal"
QA = "Qatar"
RO = "Romania"
RS = "Serbia"
RU = "Russia"
SA = "Saudi Arabia"
SE = "Sweden"
SG = "Singapore"
SI = "Slovenia"
SK = "Slovakia"
TH = "Thailand"
TN = "Tunisia"
TR = "Türkiye"
TW = "Taiwan"
UA = "Ukraine"
US = "United States"
UY = "Uruguay"
VE = "Venezuela"
VN = "Vietnam"
ZA = "South Africa"

[languages]
ar = "Arabic"
bg = "Bulgarian"
bn = "Bangla"
bs = "Bosnian"
ca = "Catalan"
cs = "Czech"
da = "Danish"
de = "German"
de_AT = "Austrian German"
de_CH = "Swiss High German"
el = "Greek"
en = "English"
en_AU = "Australian English"
en_CA = "Canadian English"
en_GB = "British English"
en_US = "American English"
es = "Spanish"
et = "Estonian"
fa = "Persian"
fi = "Finnish"
fr = "French"
fr_CA = "Canadian French"
fr_CH = "Swiss French"
ga = "Irish"
he = "Hebrew"
hi = "Hindi"
hr = "Croatian"
hu = "Hungarian"
id = "Indonesian"
is = "Icelandic"
it = "Italian"
ja = "Japanese"
ka = "Georgian"
kk = "Kazakh"
ko = "Korean"
lt = "Lithuanian"
lv = "Latvian"
mk = "Macedonian"
ms = "Malay"
mt = "Maltese"
nb = "Norwegian Bokmål"
nl = "Dutch"
nl_BE = "Flemish"
no = "Norwegian"
pl = "Polish"
pt = "Portuguese"
pt_BR = "Brazilian Portuguese"
pt_PT = "European Portuguese"
ro = "Romanian"
ru = "Russian"
sk = "Slovak"
sl = "Slovenian"
sq = "Albanian"
sr = "Serbian"
sv = "Swedish"
sw = "Swahili"
th = "Thai"
tr = "Turkish"
uk = "Ukrainian"
ur = "Urdu"
vi = "Vietnamese"
zh = "Chinese"

[locales]
ar = "Arabic"
ar_EG = "Arabic (Egypt)"
ar_SA = "Arabic (Saudi Arabia)"
cs = "Czech"
cs_CZ = "Czech (Czechia)"
da = "Danish"
da_DK = "Danish (Denmark)"
de = "German"
de_AT = "German (Austria)"
de_CH = "German (Switzerland)"
de_DE = "German (Germany)"
el = "Greek"
el_GR = "Greek (Greece)"
en = "English"
en_AU = "English (Australia)"
en_CA = "English (Canada)"
en_GB = "English (United Kingdom)"
en_IE = "English (Ireland)"
en_NZ = "English (New Zealand)"
en_US = "English (United States)"
es = "Spanish"
es_AR = "Spanish (Argentina)"
es_ES = "Spanish (Spain)"
es_MX = "Spanish (Mexico)"
et = "Estonian"
et_EE = "Estonian (Estonia)"
fi = "Finnish"
fi_FI = "Finnish (Finland)"
fr = "French"
fr_BE = "French (Belgium)"
fr_CA = "French (Canada)"
fr_CH = "French (Switzerland)"
fr_FR = "French (France)"
he = "Hebrew"
he_IL = "Hebrew (Israel)"
hi = "Hindi"
hi_IN = "Hindi (India)"
hr = "Croatian"
hr_HR = "Croatian (Croatia)"
hu = "Hungarian"
hu_HU = "Hungarian (Hungary)"
it = "Italian"
it_CH = "Italian (Switzerland)"
it_IT = "Italian (Italy)"
ja = "Japanese"
ja_JP = "Japanese (Japan)"
ko = "Korean"
ko_KR = "Korean (South Korea)"
lt = "Lithuanian"
lt_LT = "Lithuanian (Lithuania)"
lv = "Latvian"
lv_LV = "Latvian (Latvia)"
nb = "Norwegian Bokmål"
nb_NO = "Norwegian Bokmål (Norway)"
nl = "Dutch"
nl_BE = "Dutch (Belgium)"
nl_NL = "Dutch (Netherlands)"
pl = "Polish"
pl_PL = "Polish (Poland)"
pt = "Portuguese"
pt_BR = "Portuguese (Brazil)"
pt_PT = "Portuguese (Portugal)"
ro = "Romanian"
ro_RO = "Romanian (Romania)"
ru = "Russian"
ru_RU = "Russian (Russia)"
sk = "Slovak"
sk_SK = "Slovak (Slovakia)"
sl = "Slovenian"
sl_SI = "Slovenian (Slovenia)"
sv = "Swedish"
sv_SE = "Swedish (Sweden)"
th = "Thai"
th_TH = "Thai (Thailand)"
tr = "Turkish"
tr_TR = "Turkish (Türkiye)"
uk = "Ukrainian"
uk_UA = "Ukrainian (Ukraine)"
vi = "Vietnamese"
vi_VN = "Vietnamese (Vietnam)"
zh = "Chinese"
zh_CN = "Chinese (China)"
zh_TW = "Chinese (Taiwan)"
"#;

#[derive(Debug, Deserialize)]
struct LocaleTables {
    countries: BTreeMap<String, String>,
    languages: BTreeMap<String, String>,
    locales: BTreeMap<String, String>,
}

fn tables() -> &'static LocaleTables {
    static TABLES: OnceLock<LocaleTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        toml::from_str(LOCALE_TABLES).expect("Embedded locale tables should be valid TOML")
    })
}

/// Locale provider backed by the compiled-in tables.
///
/// Display names are English only; the display locale is accepted for
/// interface compatibility and ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLocales;

impl EmbeddedLocales {
    pub fn new() -> Self {
        Self
    }
}

impl LocaleProvider for EmbeddedLocales {
    fn country_names(&self, _display_locale: Option<&str>) -> BTreeMap<String, String> {
        tables().countries.clone()
    }

    fn country_name(&self, code: &str, _display_locale: Option<&str>) -> Option<String> {
        tables().countries.get(code).cloned()
    }

    fn language_names(&self, _display_locale: Option<&str>) -> BTreeMap<String, String> {
        tables().languages.clone()
    }

    fn language_name(
        &self,
        code: &str,
        region: Option<&str>,
        _display_locale: Option<&str>,
    ) -> Option<String> {
        let languages = &tables().languages;

        if let Some(region) = region {
            let qualified = format!("{}_{}", code, region.to_uppercase());
            if let Some(name) = languages.get(&qualified) {
                return Some(name.clone());
            }
        }

        languages.get(code).cloned()
    }

    fn locale_names(&self, _display_locale: Option<&str>) -> BTreeMap<String, String> {
        tables().locales.clone()
    }

    fn locale_name(&self, code: &str, _display_locale: Option<&str>) -> Option<String> {
        tables().locales.get(code).cloned()
    }
}
