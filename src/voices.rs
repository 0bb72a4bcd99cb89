
use serde::Serialize;

/// A voice type the backend is known to accept. The vendor publishes no
/// listing endpoint, so the catalog is maintained by hand.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voice {
    pub voice_id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub language: &'static str,
}

const fn voice(voice_id: &'static str, name: &'static str, category: &'static str) -> Voice {
    Voice { voice_id, name, category, language: "zh" }
}

pub const KNOWN_VOICES: &[Voice] = &[
    voice("BV001_streaming", "豆包女声-温柔", "female"),
    voice("BV002_streaming", "豆包男声-沉稳", "male"),
    voice("BV003_streaming", "豆包女声-活泼", "female"),
    voice("BV004_streaming", "豆包男声-阳光", "male"),
    voice("BV005_streaming", "豆包女声-知性", "female"),
    voice("BV006_streaming", "豆包男声-磁性", "male"),
    voice("BV007_streaming", "豆包女声-甜美", "female"),
    voice("BV008_streaming", "豆包男声-温暖", "male"),
    voice("zh_male_M392_conversation_wvae_bigtts", "男声-M392", "male"),
    voice("zh_male_jingpin_wav", "男声-精品", "male"),
    voice("zh_male_novel", "男声-小说", "male"),
    voice("zh_male_XiaoHu_tts", "男声-小虎", "male"),
    voice("zh_female_jingpin_wav", "女声-精品", "female"),
    voice("zh_female_tianmei_moon_tts", "女声-甜美", "female"),
    voice("zh_female_XiaoYun_tts", "女声-小云", "female"),
    voice("zh_female_novel", "女声-小说", "female"),
    voice("zh_female_vv_uranus_bigtts", "女声-Uranus", "female"),
];

pub fn find_voice(voice_id: &str) -> Option<&'static Voice> {
    KNOWN_VOICES.iter().find(|v| v.voice_id == voice_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn voice_ids_are_unique() {
        let ids = KNOWN_VOICES.iter().map(|v| v.voice_id).collect::<HashSet<_>>();
        assert_eq!(ids.len(), KNOWN_VOICES.len());
    }

    #[test]
    fn default_voice_is_cataloged() {
        let v = find_voice(crate::config::DEFAULT_VOICE_TYPE).unwrap();
        assert_eq!(v.category, "female");
        assert!(find_voice("no_such_voice").is_none());
    }
}
