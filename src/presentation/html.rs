// Youdao response -> HTML fragment
use crate::infrastructure::network::youdao::{BasicInfo, YoudaoResponse};
use html_escape::encode_text;
use once_cell::sync::Lazy;
use std::fmt::Write;

const SUCCESS: i64 = 0;
const QUERY_STRING_TOO_LONG: i64 = 20;
const CAN_NOT_TRANSLATE: i64 = 30;
const INVALID_LANGUAGE: i64 = 40;
const INVALID_KEY: i64 = 50;
const NO_RESULT: i64 = 60;

static HTML_STYLE: Lazy<String> = Lazy::new(|| {
    format!(
        "<style type=\"text/css\">\n{}</style>\n",
        include_str!("../../assets/youdao.css")
    )
});

/// Wrap a fragment into a full document with the bundled stylesheet.
pub fn decorate_html(fragment: &str) -> String {
    format!("<html>{}<body>{}</body></html>", &*HTML_STYLE, fragment)
}

pub fn error_message(code: i64) -> String {
    match code {
        SUCCESS => "成功".to_string(),
        QUERY_STRING_TOO_LONG => "要翻译的文本过长".to_string(),
        CAN_NOT_TRANSLATE => "无法进行有效的翻译".to_string(),
        INVALID_LANGUAGE => "不支持的语言类型".to_string(),
        INVALID_KEY => "无效的key".to_string(),
        NO_RESULT => "无词典结果".to_string(),
        other => format!("Unknown Error Code: {}", other),
    }
}

/// Render a decoded Youdao response for `query`.
///
/// A non-zero error code yields only the error message. Otherwise the
/// headline, phonetics, explanations and web meanings follow in that order,
/// each omitted when empty.
pub fn render_youdao(query: &str, response: &YoudaoResponse) -> String {
    if response.error_code != SUCCESS {
        return format!(
            "错误代码：{}\n{}",
            response.error_code,
            error_message(response.error_code)
        );
    }

    let mut html = String::new();

    let translations = response.translations.as_deref().unwrap_or_default();
    if !translations.is_empty() {
        let joined = translations
            .iter()
            .map(|t| encode_text(t))
            .collect::<Vec<_>>()
            .join(";");
        write!(html, "<div class=\"trans\">{} : {}</div>", encode_text(query), joined).ok();

        if let Some(basic) = &response.basic {
            if let Some(phonetic) = render_phonetic(basic) {
                write!(html, "<div class=\"baav\">{}</div>", phonetic).ok();
            }
            let explains = basic.explains.as_deref().unwrap_or_default();
            if !explains.is_empty() {
                let items: String = explains
                    .iter()
                    .map(|e| format!("<li>{}</li>", encode_text(e)))
                    .collect();
                write!(html, "<div class=\"trans-container\"><ul>{}</ul></div>", items).ok();
            }
        }
    }

    let web = response.web_translations.as_deref().unwrap_or_default();
    if !web.is_empty() {
        html.push_str("<div class=\"web-trans\">网络释义</div>");
        let items: String = web
            .iter()
            .map(|w| {
                let values = w
                    .value
                    .iter()
                    .flatten()
                    .map(|v| encode_text(v))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("<li>{} : {}</li>", encode_text(&w.key), values)
            })
            .collect();
        write!(html, "<div class=\"trans-container\"><ul>{}</ul></div>", items).ok();
    }

    if html.is_empty() {
        html = format!(
            "<h3>你选的内容：<span>{}</span> 抱歉,翻译不了...</h3>",
            encode_text(query)
        );
    }
    html
}

fn render_phonetic(basic: &BasicInfo) -> Option<String> {
    let span = |label: &str, value: &str| {
        format!(
            "<span class=\"pronounce\"> {}：<span class=\"phonetic\">[{}]</span></span>",
            label,
            encode_text(value)
        )
    };

    match (&basic.us_phonetic, &basic.uk_phonetic) {
        (None, None) => basic.phonetic.as_deref().map(|p| span("拼音", p)),
        (us, uk) => {
            let mut out = String::new();
            if let Some(us) = us {
                out.push_str(&span("美式", us));
            }
            if let Some(uk) = uk {
                out.push_str(&span("英式", uk));
            }
            Some(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> YoudaoResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn renders_sections_in_fixed_order() {
        let response = decode(
            r#"{"errorCode":0,"translation":["hello"],"basic":{"us-phonetic":"hə'loʊ","explains":["greeting"]},"web":[]}"#,
        );
        let html = render_youdao("你好", &response);

        let headline = html.find("<div class=\"trans\">你好 : hello</div>").unwrap();
        let phonetic = html
            .find("<span class=\"pronounce\"> 美式：<span class=\"phonetic\">[hə'loʊ]</span></span>")
            .unwrap();
        let explain = html.find("<li>greeting</li>").unwrap();
        assert!(headline < phonetic && phonetic < explain);
        assert!(!html.contains("web-trans"));
    }

    #[test]
    fn error_code_suppresses_everything_else() {
        let response = decode(
            r#"{"errorCode":60,"translation":["x"],"web":[{"key":"k","value":["v"]}]}"#,
        );
        let html = render_youdao("word", &response);
        assert_eq!(html, "错误代码：60\n无词典结果");
    }

    #[test]
    fn unknown_error_code_is_reported_verbatim() {
        let html = render_youdao("word", &decode(r#"{"errorCode":77}"#));
        assert_eq!(html, "错误代码：77\nUnknown Error Code: 77");
    }

    #[test]
    fn web_section_renders_without_translation() {
        let response = decode(
            r#"{"errorCode":0,"web":[{"key":"rust","value":["铁锈",null,"生锈"]}]}"#,
        );
        let html = render_youdao("rust", &response);
        assert!(!html.contains("class=\"trans\""));
        assert!(html.starts_with("<div class=\"web-trans\">网络释义</div>"));
        assert!(html.contains("<li>rust : 铁锈,生锈</li>"));
    }

    #[test]
    fn both_phonetics_when_present() {
        let response = decode(
            r#"{"errorCode":0,"translation":["a"],"basic":{"us-phonetic":"u","uk-phonetic":"k","phonetic":"p"}}"#,
        );
        let html = render_youdao("a", &response);
        assert!(html.contains("美式：<span class=\"phonetic\">[u]"));
        assert!(html.contains("英式：<span class=\"phonetic\">[k]"));
        assert!(!html.contains("拼音"));
    }

    #[test]
    fn generic_phonetic_as_fallback() {
        let response = decode(r#"{"errorCode":0,"translation":["a"],"basic":{"phonetic":"nǐ hǎo"}}"#);
        assert!(render_youdao("a", &response).contains("拼音：<span class=\"phonetic\">[nǐ hǎo]"));
    }

    #[test]
    fn nothing_to_show_yields_apology() {
        let html = render_youdao("??", &decode(r#"{"errorCode":0,"translation":[]}"#));
        assert_eq!(html, "<h3>你选的内容：<span>??</span> 抱歉,翻译不了...</h3>");
    }

    #[test]
    fn translations_are_joined_with_semicolons() {
        let html = render_youdao("x", &decode(r#"{"errorCode":0,"translation":["a","b<c"]}"#));
        assert_eq!(html, "<div class=\"trans\">x : a;b&lt;c</div>");
    }

    #[test]
    fn null_explains_is_treated_as_missing() {
        let html = render_youdao(
            "x",
            &decode(r#"{"errorCode":0,"translation":["y"],"basic":{"phonetic":"p","explains":null}}"#),
        );
        assert!(html.starts_with("<div class=\"trans\">x : y</div><div class=\"baav\">"));
        assert!(!html.contains("<ul>"));
    }

    #[test]
    fn markup_in_provider_text_is_escaped() {
        let html = render_youdao(
            "<b>",
            &decode(r#"{"errorCode":0,"translation":["a & b"],"web":[{"key":"k<","value":["v>"]}]}"#),
        );
        assert!(html.contains("<div class=\"trans\">&lt;b&gt; : a &amp; b</div>"));
        assert!(html.contains("<li>k&lt; : v&gt;</li>"));
    }

    #[test]
    fn decorated_document_carries_style() {
        let doc = decorate_html("<p>x</p>");
        assert!(doc.starts_with("<html><style type=\"text/css\">"));
        assert!(doc.ends_with("<body><p>x</p></body></html>"));
    }
}
