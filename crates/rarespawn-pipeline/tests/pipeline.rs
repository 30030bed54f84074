//! End-to-end behaviour of `Pipeline::handle` with injected collaborators.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rarespawn_core::{FormatConfig, NameTable};
use rarespawn_pipeline::{
    LabelStore, PassthroughTranslator, Pipeline, Resolver, TranslateError, TranslateSettings,
    Translator,
};

const ALERT: &str = ":flag_us: <a:shiny:1098230981> ***Pikachu*** ♀ IV100 **CP1234** **L35** \
DSP in 25m WXL HXS - *Philadelphia, USA* - (39.915432, -75.137098)";

const TEMPLATE: &str = "{flag}{shiny_symbol} {name_cn}({name_en}) {gender} IV{iv} {size_info} \
L{level} CP{cp} {dsp} [{custom_label}] {translated_city} {coords}";

struct Dictionary;

#[async_trait]
impl Translator for Dictionary {
    async fn translate(&self, text: &str, _: &str, _: &str) -> Result<String, TranslateError> {
        match text {
            "Philadelphia" => Ok("費城".to_string()),
            "Tokyo" => Ok("東京".to_string()),
            _ => Err(TranslateError::EmptyResponse),
        }
    }
}

struct AlwaysFails;

#[async_trait]
impl Translator for AlwaysFails {
    async fn translate(&self, _: &str, _: &str, _: &str) -> Result<String, TranslateError> {
        Err(TranslateError::Timeout(1))
    }
}

fn names() -> Arc<NameTable> {
    Arc::new(
        [("Pikachu".to_string(), "皮卡丘".to_string())]
            .into_iter()
            .collect(),
    )
}

fn pipeline_with(translator: Arc<dyn Translator>, labels: Arc<LabelStore>) -> Pipeline {
    let resolver = Resolver::new(
        names(),
        translator,
        TranslateSettings {
            timeout: Duration::from_millis(200),
            ..TranslateSettings::default()
        },
    );
    Pipeline::new(FormatConfig::new(TEMPLATE, "路人"), resolver, labels)
}

fn pipeline() -> Pipeline {
    pipeline_with(Arc::new(Dictionary), Arc::new(LabelStore::in_memory()))
}

#[tokio::test]
async fn full_alert_renders_every_field() {
    let out = pipeline().handle("alice", ALERT).await;
    assert_eq!(
        out,
        "🇺🇸✨ 皮卡丘(Pikachu) ♀ IV💯 WXL HXS L35 CP1234 DSP:25m [路人] 費城，USA 39.9154, -75.1371"
    );
}

#[tokio::test]
async fn bare_text_renders_all_sentinels() {
    let out = pipeline().handle("alice", "hello").await;
    assert_eq!(
        out,
        "🏳️ 未知寶可夢(未知寶可夢) ♂ IV未知  L未知 CP未知 無 DSP 時間 [路人] 未知地點 未知座標"
    );
}

#[tokio::test]
async fn missing_markers_leave_other_fields_intact() {
    let out = pipeline()
        .handle("alice", "***Pikachu*** IV87 - Tokyo - 35.6762, 139.6503")
        .await;
    assert_eq!(
        out,
        "🏳️ 皮卡丘(Pikachu) ♂ IV87  L未知 CP未知 無 DSP 時間 [路人] 東京 35.6762, 139.6503"
    );
}

#[tokio::test]
async fn translation_failure_keeps_original_place() {
    let p = pipeline_with(Arc::new(AlwaysFails), Arc::new(LabelStore::in_memory()));
    let out = p.handle("alice", ALERT).await;
    assert!(out.contains("Philadelphia, USA"), "got: {out}");
}

#[tokio::test]
async fn set_label_then_render_uses_it() {
    let p = pipeline();
    let reply = p.handle("alice", "設定名稱 Bob").await;
    assert_eq!(reply, "✅ 名稱已設定為：Bob");
    assert_eq!(p.labels().get("alice").await.as_deref(), Some("Bob"));

    let out = p.handle("alice", ALERT).await;
    assert!(out.contains("[Bob]"), "got: {out}");

    let other = p.handle("carol", ALERT).await;
    assert!(other.contains("[路人]"), "got: {other}");
}

#[tokio::test]
async fn empty_label_command_is_usage_error_without_mutation() {
    let p = pipeline();
    let reply = p.handle("alice", "設定名稱").await;
    assert_eq!(reply, "⚠️ 請輸入名稱，例如：設定名稱 小明");
    assert!(p.labels().is_empty().await);

    let reply = p.handle("alice", "  設定名稱    ").await;
    assert!(reply.starts_with("⚠️"));
    assert!(p.labels().is_empty().await);
}

#[tokio::test]
async fn persistence_failure_is_reported_not_confirmed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("labels.json");
    std::fs::create_dir(dir.path().join("labels.json.tmp")).expect("create blocker");
    let labels = Arc::new(LabelStore::open(&path).await.expect("open"));

    let p = pipeline_with(Arc::new(PassthroughTranslator), labels);
    let reply = p.handle("alice", "設定名稱 Bob").await;
    assert_eq!(reply, "❌ 名稱儲存失敗，請稍後再試");
    assert_eq!(p.labels().get("alice").await, None);
}

#[tokio::test]
async fn output_is_trimmed() {
    let resolver = Resolver::new(
        names(),
        Arc::new(PassthroughTranslator),
        TranslateSettings::default(),
    );
    let p = Pipeline::new(
        FormatConfig::new("  {shiny_symbol} {name_en}  ", "x"),
        resolver,
        Arc::new(LabelStore::in_memory()),
    );
    assert_eq!(p.handle("a", "***Eevee***").await, "Eevee");
}

#[tokio::test]
async fn reload_swaps_template_and_rejects_bad_files() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "output_format: \"{{name_en}}!\"\ndefault_label: \"x\"").expect("write");

    let p = pipeline().with_format_path(file.path());
    p.reload().expect("reload");
    assert_eq!(p.handle("a", "***Eevee***").await, "Eevee!");

    let mut broken = std::fs::File::create(file.path()).expect("truncate");
    writeln!(broken, "output_format: \"{{nope}}\"\ndefault_label: \"x\"").expect("write");
    assert!(p.reload().is_err());
    assert_eq!(p.handle("a", "***Eevee***").await, "Eevee!");
}

#[tokio::test]
async fn reload_without_path_is_noop() {
    let p = pipeline();
    assert!(p.reload().is_ok());
    assert_eq!(p.format().default_label, "路人");
}

#[tokio::test]
async fn numeric_fields_render_digits_as_written() {
    let resolver = Resolver::new(
        names(),
        Arc::new(PassthroughTranslator),
        TranslateSettings::default(),
    );
    let p = Pipeline::new(
        FormatConfig::new("[{iv}] [{cp}] [{level}] [{dsp}]", "x"),
        resolver,
        Arc::new(LabelStore::in_memory()),
    );

    assert_eq!(
        p.handle("a", "IV0100 **CP0042**").await,
        "[0100] [0042] [未知] [無 DSP 時間]"
    );
    assert_eq!(
        p.handle("a", "IV087 **L07**").await,
        "[087] [未知] [07] [無 DSP 時間]"
    );
    assert_eq!(
        p.handle("a", "IV99999999999 DSP in 99999999999m").await,
        "[99999999999] [未知] [未知] [DSP:99999999999m]"
    );
    assert_eq!(p.handle("a", "IV100").await, "[💯] [未知] [未知] [無 DSP 時間]");
}
