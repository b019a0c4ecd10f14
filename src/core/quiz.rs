use crate::core::content::QuizQuestion;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTier {
    Perfect,
    Excellent,
    Good,
    Explore,
}

impl ResultTier {
    pub fn for_score(score: usize, total: usize) -> Self {
        if score == total {
            ResultTier::Perfect
        } else if score * 10 >= total * 7 {
            ResultTier::Excellent
        } else if score * 2 >= total {
            ResultTier::Good
        } else {
            ResultTier::Explore
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ResultTier::Perfect => "Perfect! You are a true Life of Pi literary expert!",
            ResultTier::Excellent => "Excellent! You have strong literary knowledge!",
            ResultTier::Good => "Good job! You understand the key literary aspects.",
            ResultTier::Explore => "A great opportunity to explore this masterpiece further!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
}

impl QuizResult {
    pub fn tier(&self) -> ResultTier {
        ResultTier::for_score(self.score, self.total)
    }

    pub fn score_label(&self) -> String {
        format!("{}/{}", self.score, self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Answering,
    Finished(QuizResult),
}

/// One pass through the quiz: a question pointer plus one answer slot per question.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<usize>>,
    pointer: usize,
    phase: QuizPhase,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self> {
        if questions.is_empty() {
            anyhow::bail!("Cannot start a quiz without questions");
        }
        let answers = vec![None; questions.len()];
        Ok(Self {
            questions,
            answers,
            pointer: 0,
            phase: QuizPhase::Answering,
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, QuizPhase::Finished(_))
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.pointer]
    }

    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(question).copied().flatten()
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn is_selected(&self, option: usize) -> bool {
        self.answer(self.pointer) == Some(option)
    }

    /// Records `option` for the current question, replacing any earlier pick.
    pub fn select_answer(&mut self, option: usize) {
        if self.is_finished() || option >= self.current_question().options.len() {
            return;
        }
        self.answers[self.pointer] = Some(option);
    }

    /// Moves on, or scores the quiz when already on the last question.
    pub fn next_question(&mut self) {
        if self.is_finished() {
            return;
        }
        if self.pointer + 1 < self.questions.len() {
            self.pointer += 1;
        } else {
            let result = self.compute_results();
            log::debug!("quiz finished with {}", result.score_label());
            self.phase = QuizPhase::Finished(result);
        }
    }

    pub fn prev_question(&mut self) {
        if !self.is_finished() && self.pointer > 0 {
            self.pointer -= 1;
        }
    }

    pub fn compute_results(&self) -> QuizResult {
        let score = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| **a == Some(q.correct))
            .count();
        QuizResult {
            score,
            total: self.questions.len(),
        }
    }

    pub fn restart(&mut self) {
        self.pointer = 0;
        self.answers.iter_mut().for_each(|a| *a = None);
        self.phase = QuizPhase::Answering;
    }

    pub fn progress_percent(&self) -> f64 {
        (self.pointer + 1) as f64 / self.questions.len() as f64 * 100.0
    }

    pub fn shows_prev(&self) -> bool {
        self.pointer > 0
    }

    pub fn next_label(&self) -> &'static str {
        if self.pointer + 1 == self.questions.len() {
            "See Results"
        } else {
            "Next Question"
        }
    }

    /// `"3. What was the tiger's name?"`
    pub fn question_heading(&self) -> String {
        format!("{}. {}", self.pointer + 1, self.current_question().question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::ContentRegistry;

    fn session() -> Result<QuizSession> {
        QuizSession::new(ContentRegistry::builtin()?.quiz)
    }

    fn answer_all(quiz: &mut QuizSession, picks: &[usize]) {
        for &pick in picks {
            quiz.select_answer(pick);
            quiz.next_question();
        }
    }

    #[test]
    fn test_answers_survive_navigation() -> Result<()> {
        let mut quiz = session()?;
        for _ in 0..3 {
            quiz.next_question();
        }
        quiz.select_answer(1);
        while quiz.pointer() < 9 {
            quiz.next_question();
        }
        while quiz.pointer() > 3 {
            quiz.prev_question();
        }
        assert_eq!(quiz.answer(3), Some(1));
        assert!(quiz.is_selected(1));
        assert!(!quiz.is_selected(0));
        Ok(())
    }

    #[test]
    fn test_nine_of_ten_is_excellent() -> Result<()> {
        let mut quiz = session()?;
        answer_all(&mut quiz, &[1, 0, 1, 1, 2, 2, 1, 1, 2, 0]);
        match quiz.phase() {
            QuizPhase::Finished(result) => {
                assert_eq!(result.score_label(), "9/10");
                assert_eq!(result.tier(), ResultTier::Excellent);
            }
            QuizPhase::Answering => panic!("quiz should be finished"),
        }
        Ok(())
    }

    #[test]
    fn test_perfect_score() -> Result<()> {
        let mut quiz = session()?;
        answer_all(&mut quiz, &[1, 0, 1, 1, 1, 2, 1, 1, 2, 0]);
        assert_eq!(quiz.compute_results().tier(), ResultTier::Perfect);
        Ok(())
    }

    #[test]
    fn test_unanswered_counts_as_wrong() -> Result<()> {
        let mut quiz = session()?;
        for _ in 0..10 {
            quiz.next_question();
        }
        let result = quiz.compute_results();
        assert_eq!(result.score, 0);
        assert_eq!(result.tier(), ResultTier::Explore);
        assert!(quiz.is_finished());
        Ok(())
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ResultTier::for_score(10, 10), ResultTier::Perfect);
        assert_eq!(ResultTier::for_score(7, 10), ResultTier::Excellent);
        assert_eq!(ResultTier::for_score(6, 10), ResultTier::Good);
        assert_eq!(ResultTier::for_score(5, 10), ResultTier::Good);
        assert_eq!(ResultTier::for_score(4, 10), ResultTier::Explore);
        assert_eq!(ResultTier::for_score(2, 3), ResultTier::Good);
    }

    #[test]
    fn test_restart_clears_everything() -> Result<()> {
        let mut quiz = session()?;
        answer_all(&mut quiz, &[1, 0, 3, 2]);
        quiz.restart();
        assert_eq!(quiz.pointer(), 0);
        assert_eq!(quiz.answers().len(), 10);
        assert!(quiz.answers().iter().all(Option::is_none));
        assert_eq!(quiz.phase(), QuizPhase::Answering);
        assert!(!quiz.shows_prev());
        Ok(())
    }

    #[test]
    fn test_prev_is_noop_on_first_question() -> Result<()> {
        let mut quiz = session()?;
        quiz.prev_question();
        assert_eq!(quiz.pointer(), 0);
        assert!(!quiz.shows_prev());
        quiz.next_question();
        assert!(quiz.shows_prev());
        Ok(())
    }

    #[test]
    fn test_view_helpers() -> Result<()> {
        let mut quiz = session()?;
        assert_eq!(quiz.progress_percent(), 10.0);
        assert_eq!(quiz.next_label(), "Next Question");
        assert_eq!(quiz.question_heading(), "1. What year did Life of Pi win the Man Booker Prize?");
        while quiz.pointer() < 9 {
            quiz.next_question();
        }
        assert_eq!(quiz.progress_percent(), 100.0);
        assert_eq!(quiz.next_label(), "See Results");
        Ok(())
    }

    #[test]
    fn test_out_of_range_option_is_ignored() -> Result<()> {
        let mut quiz = session()?;
        quiz.select_answer(2);
        quiz.select_answer(4);
        assert_eq!(quiz.answer(0), Some(2));
        Ok(())
    }

    #[test]
    fn test_empty_quiz_is_rejected() {
        assert!(QuizSession::new(Vec::new()).is_err());
    }
}
