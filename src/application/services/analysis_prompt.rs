use crate::domain::AnalysisRequest;

pub fn build_analysis_prompt(request: &AnalysisRequest) -> String {
    format!(
        r#"You are an expert speech and language analyst. Please analyze the following speech transcription for accuracy and fluency.

Original Text: "{original}"
Transcribed Text: "{transcribed}"

Please provide a detailed analysis in the following JSON format:
{{
    "accuracy_score": <number between 0-100>,
    "fluency_score": <number between 0-100>,
    "overall_score": <number between 0-100>,
    "word_accuracy": <percentage of correctly transcribed words>,
    "missing_words": ["list", "of", "missing", "words"],
    "incorrect_words": [
        {{"original": "word1", "transcribed": "word2"}},
        {{"original": "word3", "transcribed": "word4"}}
    ],
    "strengths": ["list", "of", "positive", "aspects"],
    "areas_for_improvement": ["list", "of", "suggestions"],
    "detailed_feedback": "Comprehensive feedback paragraph"
}}

Focus on:
1. Word accuracy (how many words were correctly transcribed)
2. Pronunciation clarity (based on transcription accuracy)
3. Missing or added words
4. Overall speech quality indicators
5. Specific recommendations for improvement

Provide scores as integers from 0-100 where 100 is perfect."#,
        original = request.original_text,
        transcribed = request.transcribed_text,
    )
}
