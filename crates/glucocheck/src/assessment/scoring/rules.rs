use super::super::domain::{AnswerSet, AreaScores, GlucoseMonitoring, MedicationFrequency};

const EXERCISE_KEYWORDS: [&str; 3] = ["ejercicio", "deporte", "caminar"];
const DIET_KEYWORDS: [&str; 3] = ["dieta", "alimentación", "comer"];
const DESCRIPTIVE_HABITS_LENGTH: usize = 20;

pub(crate) fn score_answers(answers: &AnswerSet) -> AreaScores {
    AreaScores {
        knowledge: knowledge_score(answers),
        medication: medication_score(answers.medication_frequency),
        monitoring: monitoring_score(answers.glucose_monitoring),
        lifestyle: lifestyle_score(&answers.healthy_habits),
    }
}

fn knowledge_score(answers: &AnswerSet) -> u8 {
    if answers.knowledge_about_diabetes.is_yes() {
        8
    } else {
        4
    }
}

fn medication_score(frequency: MedicationFrequency) -> u8 {
    match frequency {
        MedicationFrequency::Daily => 9,
        MedicationFrequency::AlmostAlways => 6,
        MedicationFrequency::Rarely => 3,
    }
}

fn monitoring_score(monitoring: GlucoseMonitoring) -> u8 {
    match monitoring {
        GlucoseMonitoring::Every12Hours => 9,
        GlucoseMonitoring::EveryDay => 7,
        GlucoseMonitoring::Rarely => 3,
    }
}

/// Exercise mentions outrank diet mentions, which outrank a merely descriptive answer.
pub(crate) fn lifestyle_score(habits: &str) -> u8 {
    let lowered = habits.to_lowercase();

    if EXERCISE_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        8
    } else if DIET_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        7
    } else if habits.chars().count() > DESCRIPTIVE_HABITS_LENGTH {
        6
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exercise_keywords_win() {
        assert_eq!(lifestyle_score("Hago EJERCICIO tres veces"), 8);
        assert_eq!(lifestyle_score("deporte y dieta"), 8);
        assert_eq!(lifestyle_score("Salgo a caminar"), 8);
    }

    #[test]
    fn diet_keywords_score_below_exercise() {
        assert_eq!(lifestyle_score("Cuido mi dieta"), 7);
        assert_eq!(lifestyle_score("Buena ALIMENTACIÓN"), 7);
        assert_eq!(lifestyle_score("Intento comer sano"), 7);
    }

    #[test]
    fn long_text_without_keywords_scores_six() {
        let text = "Duermo ocho horas cada";
        assert!(text.chars().count() > 20);
        assert_eq!(lifestyle_score(text), 6);
        assert_eq!(lifestyle_score("a".repeat(25).as_str()), 6);
    }

    #[test]
    fn short_or_empty_text_scores_four() {
        assert_eq!(lifestyle_score(""), 4);
        assert_eq!(lifestyle_score("Nada"), 4);
        assert_eq!(lifestyle_score(&"x".repeat(20)), 4);
    }
}
