//! User-facing texts.

use classifier::{Label, Prediction, PredictionFailure};
use storage::Rating;

pub const CHOOSE_MODEL: &str = "Пожалуйста, выберите модель для анализа:";
pub const CHOOSE_FROM_KEYBOARD: &str =
    "Пожалуйста, выберите модель из предложенных вариантов на клавиатуре.";
pub const NOTHING_TO_CANCEL: &str = "Нечего отменять.";
pub const CANCELLED: &str = "Действие отменено.";
pub const ANALYZING: &str = "🔎 Анализирую новость...";
pub const MODEL_NOT_SELECTED: &str =
    "Произошла ошибка, модель не была выбрана. Пожалуйста, начните сначала с /analyze.";
pub const FEEDBACK_THANKS: &str = "Спасибо за ваш отзыв! 😊";
pub const FEEDBACK_FAILED: &str = "Произошла ошибка при сохранении отзыва. Попробуйте позже.";
pub const FEEDBACK_CORRECT_BUTTON: &str = "👍 Правильно";
pub const FEEDBACK_INCORRECT_BUTTON: &str = "👎 Ошибка";

pub fn welcome(name: &str) -> String {
    format!(
        "Привет, {}! 👋 Я бот для определения фейковых новостей.\n\n\
         Вот что я умею:\n\
         👉 /analyze - Начать анализ текста новости.\n\
         👉 /help - Показать это сообщение еще раз.\n\
         👉 /cancel - Отменить текущее действие.\n\n\
         Просто отправь мне команду, чтобы начать!",
        name
    )
}

pub fn model_selected(display_name: &str, description: &str) -> String {
    format!(
        "Выбрана: {}.\n{}\n\nТеперь отправьте мне текст новости для анализа.",
        display_name, description
    )
}

fn verdict(prediction: &Prediction, display_name: &str) -> String {
    match (&prediction.label, &prediction.failure) {
        (Label::Real, _) => "REAL ✅".to_string(),
        (Label::Fake, _) => "FAKE 🤥".to_string(),
        (Label::Error, Some(PredictionFailure::NothingToClassify)) => {
            "Не удалось обработать текст".to_string()
        }
        (Label::Error, Some(PredictionFailure::UnknownModel(_))) => {
            "Ошибка: модель не найдена".to_string()
        }
        (Label::Error, _) => format!("Ошибка предсказания ({})", display_name),
    }
}

/// Result message: verdict, plus confidence as a percentage with two decimals when present.
pub fn result(prediction: &Prediction, display_name: &str) -> String {
    let mut text = format!(
        "Результат ({}): {}",
        display_name,
        verdict(prediction, display_name)
    );
    if let Some(confidence) = prediction.confidence {
        text.push_str(&format!("\nУверенность: {:.2}%", f64::from(confidence) * 100.0));
    }
    text
}

pub fn feedback_recorded(rating: Rating) -> String {
    let kind = match rating {
        Rating::Correct => "положительный",
        Rating::Incorrect => "отрицательный",
    };
    format!("Ваш {} отзыв по запросу учтен. Спасибо!", kind)
}
