use axum::response::Html;

use crate::domain::{presenter::ConversionState, presenter::MAX_TEXT_CHARS, tts::LanguageCode};

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Text-to-Speech Converter</title>
</head>
<body>
<h1>Text-to-Speech Converter</h1>
<form id="tts-form">
  <label for="language">Language</label>
  <select id="language" name="language">{{LANGUAGE_OPTIONS}}</select>

  <h2>Input Text</h2>
  <label for="text">1. Type Text Directly</label>
  <textarea id="text" name="text" rows="8" cols="60" placeholder="Type message..."></textarea>

  <label for="file">2. Upload File</label>
  <input id="file" name="file" type="file" accept=".txt,text/plain">
  <p>Only .txt files are supported</p>

  <button type="submit">Generate Audio</button>
</form>

<h2>Audio Output</h2>
<div id="result" data-severity="info">{{IDLE_MESSAGE}}</div>
<p id="hint"></p>
<audio id="player" controls hidden></audio>
<a id="download" hidden>Download MP3 File</a>

<script>
const form = document.getElementById("tts-form");
const result = document.getElementById("result");
const hint = document.getElementById("hint");
const player = document.getElementById("player");
const download = document.getElementById("download");
const MAX_CHARS = {{MAX_CHARS}};

function show(severity, message, hintText) {
  result.dataset.severity = severity;
  result.textContent = message;
  hint.textContent = hintText || "";
}

form.addEventListener("submit", async (event) => {
  event.preventDefault();
  player.hidden = true;
  download.hidden = true;
  show("info", "Generating...");

  const response = await fetch("/api/tts/convert", { method: "POST", body: new FormData(form) });
  if (!response.ok) {
    const body = await response.json().catch(() => ({ message: response.statusText }));
    show(body.severity || "error", body.message, body.hint);
    return;
  }

  const audio = await response.blob();
  const url = URL.createObjectURL(audio);
  const language = response.headers.get("x-language");
  player.src = url;
  player.hidden = false;
  download.href = url;
  download.download = "TTS_Output_" + language + ".mp3";
  download.hidden = false;
  const option = form.language.selectedOptions[0];
  show("success", "Generated in " + option.textContent + "!");
});

form.text.addEventListener("input", () => {
  if (form.text.value.length > MAX_CHARS) {
    hint.textContent = "Max " + MAX_CHARS + " chars recommended.";
  }
});
</script>
</body>
</html>
"#;

/// GET / - The conversion form
pub async fn index() -> Html<String> {
    Html(render_index())
}

fn render_index() -> String {
    let options: String = LanguageCode::all()
        .iter()
        .map(|lang| format!(r#"<option value="{}">{}</option>"#, lang.as_str(), lang.label()))
        .collect();

    PAGE_TEMPLATE
        .replace("{{LANGUAGE_OPTIONS}}", &options)
        .replace("{{IDLE_MESSAGE}}", &ConversionState::Idle.presentation().message)
        .replace("{{MAX_CHARS}}", &MAX_TEXT_CHARS.to_string())
}
