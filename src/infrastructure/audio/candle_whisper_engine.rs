use std::fmt::Display;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::StoredAudio;

use super::audio_decoder::decode_file_to_pcm;

const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";

/// Runs OpenAI Whisper weights locally through candle.
///
/// The model is loaded once and shared; transcriptions take turns on it and
/// run on tokio's blocking pool.
pub struct CandleWhisperEngine {
    runtime: Arc<WhisperRuntime>,
    model_id: String,
}

struct WhisperRuntime {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
    prompt_tokens: Vec<u32>,
    eot_token: u32,
}

impl CandleWhisperEngine {
    /// `model` is a size alias (`tiny`, `base`, `small`, ...) or a full hub repo id.
    pub fn new(model: &str, language: &str) -> Result<Self, TranscriptionError> {
        let model_id = Self::resolve_model_id(model);
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = %model_id,
            language,
            "Loading Whisper model"
        );

        let api = Api::new().map_err(load_failed("hub"))?;
        let repo = api.repo(Repo::new(model_id.clone(), RepoType::Model));

        let config_path = repo.get("config.json").map_err(load_failed("config.json"))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(load_failed("tokenizer.json"))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(load_failed("model.safetensors"))?;
        let mel_path = api
            .repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model))
            .get("melfilters.bytes")
            .map_err(load_failed("melfilters.bytes"))?;

        let config: Config = serde_json::from_str(
            &std::fs::read_to_string(&config_path).map_err(load_failed("read config"))?,
        )
        .map_err(load_failed("parse config"))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(load_failed("tokenizer"))?;

        let mel_bytes = std::fs::read(&mel_path).map_err(load_failed("mel filters"))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        let prompt_tokens = Self::prompt_tokens(&tokenizer, language)?;
        let eot_token = token_id(&tokenizer, m::EOT_TOKEN)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(load_failed("weights"))?
        };
        let model = m::model::Whisper::load(&vb, config.clone()).map_err(load_failed("model"))?;

        tracing::info!(model = %model_id, "Whisper model loaded");

        Ok(Self {
            runtime: Arc::new(WhisperRuntime {
                model: Mutex::new(model),
                tokenizer,
                config,
                device,
                mel_filters,
                prompt_tokens,
                eot_token,
            }),
            model_id,
        })
    }

    /// Size aliases map to `openai/whisper-<size>`; anything with a `/` is taken as a repo id.
    pub fn resolve_model_id(model: &str) -> String {
        if model.contains('/') {
            model.to_string()
        } else {
            format!("openai/whisper-{}", model)
        }
    }

    /// Decoder prefix: start of transcript, language (when the vocabulary has it),
    /// transcribe task, no timestamps.
    pub fn prompt_tokens(
        tokenizer: &Tokenizer,
        language: &str,
    ) -> Result<Vec<u32>, TranscriptionError> {
        let mut tokens = vec![token_id(tokenizer, m::SOT_TOKEN)?];

        // English-only checkpoints carry no language tokens.
        match tokenizer.token_to_id(&format!("<|{}|>", language)) {
            Some(id) => tokens.push(id),
            None => tracing::warn!(language, "Model has no token for language, not forcing it"),
        }

        tokens.push(token_id(tokenizer, m::TRANSCRIBE_TOKEN)?);
        tokens.push(token_id(tokenizer, m::NO_TIMESTAMPS_TOKEN)?);
        Ok(tokens)
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(&self, audio: &StoredAudio) -> Result<String, TranscriptionError> {
        let runtime = Arc::clone(&self.runtime);
        let path = audio.path.clone();

        tokio::task::spawn_blocking(move || runtime.transcribe_file(&path))
            .await
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("worker: {}", e)))?
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }
}

impl WhisperRuntime {
    fn transcribe_file(&self, path: &Path) -> Result<String, TranscriptionError> {
        let pcm = decode_file_to_pcm(path)?;

        let mels = pcm
            .chunks(m::N_SAMPLES)
            .map(|window| self.mel_tensor(window))
            .collect::<Result<Vec<_>, _>>()?;

        let mut model = self
            .model
            .lock()
            .map_err(|_| TranscriptionError::TranscriptionFailed("model lock poisoned".into()))?;

        let mut segments = Vec::with_capacity(mels.len());
        for (i, mel) in mels.iter().enumerate() {
            tracing::debug!(segment = i, "Transcribing audio window");
            let text = self.decode_window(&mut model, mel)?;
            if !text.is_empty() {
                segments.push(text);
            }
        }

        let transcript = segments.join(" ");
        tracing::info!(
            windows = mels.len(),
            chars = transcript.len(),
            "Local Whisper transcription completed"
        );

        Ok(transcript)
    }

    fn mel_tensor(&self, window: &[f32]) -> Result<Tensor, TranscriptionError> {
        let mut samples = window.to_vec();
        samples.resize(m::N_SAMPLES, 0.0);

        let mel = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
        let n_mel = self.config.num_mel_bins;
        let n_frames = mel.len() / n_mel;

        Tensor::from_vec(mel, (1, n_mel, n_frames), &self.device).map_err(failed("mel tensor"))
    }

    /// Greedy decode of one 30 s window.
    fn decode_window(
        &self,
        model: &mut m::model::Whisper,
        mel: &Tensor,
    ) -> Result<String, TranscriptionError> {
        let audio_features = model
            .encoder
            .forward(mel, true)
            .map_err(failed("encoder"))?;

        let max_new_tokens = self.config.max_target_positions / 2;
        let mut tokens = self.prompt_tokens.clone();
        let mut generated = Vec::new();

        for step in 0..max_new_tokens {
            let input = Tensor::new(tokens.as_slice(), &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(failed("token tensor"))?;

            let hidden = model
                .decoder
                .forward(&input, &audio_features, step == 0)
                .map_err(failed("decoder"))?;

            let seq_len = hidden.dim(1).map_err(failed("decoder output"))?;
            let next_token = hidden
                .narrow(1, seq_len - 1, 1)
                .and_then(|last| model.decoder.final_linear(&last))
                .and_then(|logits| logits.flatten_all())
                .and_then(|logits| logits.argmax(0))
                .and_then(|id| id.to_scalar::<u32>())
                .map_err(failed("logits"))?;

            if next_token == self.eot_token {
                break;
            }
            tokens.push(next_token);
            generated.push(next_token);
        }

        model.reset_kv_cache();

        let text = self
            .tokenizer
            .decode(&generated, true)
            .map_err(failed("detokenize"))?;
        Ok(text.trim().to_string())
    }
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer
        .token_to_id(token)
        .ok_or_else(|| TranscriptionError::ModelLoadFailed(format!("token not found: {}", token)))
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

fn load_failed<E: Display>(what: &'static str) -> impl Fn(E) -> TranscriptionError {
    move |e| TranscriptionError::ModelLoadFailed(format!("{}: {}", what, e))
}

fn failed<E: Display>(what: &'static str) -> impl Fn(E) -> TranscriptionError {
    move |e| TranscriptionError::TranscriptionFailed(format!("{}: {}", what, e))
}
