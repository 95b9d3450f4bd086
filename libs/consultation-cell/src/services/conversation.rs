use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use advice_cell::models::AdviceResponse;
use doctor_cell::models::{AvailabilityView, Specialty};
use doctor_cell::services::{AvailabilityService, DoctorNameMatcher, Roster};
use shared_config::AppConfig;
use shared_utils::Clock;

use crate::error::ConsultationError;
use crate::models::{
    AdviceRequest, BookingConfirmation, BookingDraft, ChatMessage, ConsultationSnapshot,
    FollowUpChoice, Intent, Role, TurnOutcome, UpdateDraftRequest,
};
use crate::services::extraction::{DateTimeExtractor, ExtractedSchedule};
use crate::services::intent::IntentClassifier;
use crate::services::symptoms::SymptomResolver;

pub const SEED_GREETING: &str = "Hello! I'm your AI health assistant. I can help you in two ways:\n\n1. 🩺 Find and book appointments with specialist doctors\n2. 💬 Provide health guidance and answer your questions\n\nPlease describe your symptoms or health concerns, and I'll assist you accordingly!";

pub const SYMPTOM_PLACEHOLDER: &str =
    "🤔 Analyzing your symptoms and preparing personalized health guidance...";
pub const QUESTION_PLACEHOLDER: &str =
    "🤔 Let me analyze your question and provide detailed guidance...";

const PREFILLED_NOTE: &str = " I've pre-filled your preferred date and time.";

const CLARIFICATION: &str = "I'm sorry, I don't understand what you're trying to say. Could you please clarify?

I'm here to help you with:

• **Health symptoms** you're experiencing
• **Medical questions** you have
• **Finding and booking** appointments with specialist doctors

Please describe your symptoms or health concerns in more detail, or let me know how I can assist you today.

For example, you could say:
- \"I have a headache that won't go away\"
- \"I need help with chest pain\"
- \"I want to book an appointment with a cardiologist\"
- \"I have questions about managing stress\"";

/// Entries kept in the advice context window (query and reply pairs).
const CONTEXT_WINDOW: usize = 6;
/// Most recent entries joined into the context string sent with a query.
const CONTEXT_TAIL: usize = 3;

/// Read-only collaborators shared by every consultation session.
pub struct ConsultationServices {
    pub roster: Roster,
    pub clock: Arc<dyn Clock>,
    pub classifier: IntentClassifier,
    pub resolver: SymptomResolver,
    pub extractor: DateTimeExtractor,
    pub matcher: DoctorNameMatcher,
}

impl ConsultationServices {
    pub fn new(roster: Roster, clock: Arc<dyn Clock>, booking_month: u32) -> Result<Self, ConsultationError> {
        Ok(Self {
            classifier: IntentClassifier::new(booking_month)?,
            resolver: SymptomResolver::new(roster.clone()),
            extractor: DateTimeExtractor::new(booking_month, clock.clone())?,
            matcher: DoctorNameMatcher::new(),
            roster,
            clock,
        })
    }

    pub fn from_config(config: &AppConfig, roster: Roster, clock: Arc<dyn Clock>) -> Result<Self, ConsultationError> {
        Self::new(roster, clock, config.booking_month)
    }

    fn all_doctors(&self) -> Vec<AvailabilityView> {
        AvailabilityService::annotate_roster(&self.roster)
    }
}

// ==============================================================================
// PHASES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConversationPhase {
    /// Seed greeting only.
    #[default]
    Greeting,
    /// Symptoms resolved to a candidate set that has not been shown yet.
    AwaitingIntent { candidates: Vec<AvailabilityView> },
    DoctorsShown { candidates: Vec<AvailabilityView> },
    BookingInProgress {
        candidates: Vec<AvailabilityView>,
        doctor: AvailabilityView,
    },
}

#[derive(Debug, Clone)]
pub enum PhaseEvent {
    CandidatesResolved(Vec<AvailabilityView>),
    ShowDoctors(Vec<AvailabilityView>),
    DoctorChosen {
        candidates: Vec<AvailabilityView>,
        doctor: AvailabilityView,
    },
    Reset,
}

impl ConversationPhase {
    /// The only way phases change. A list is never shown empty and a
    /// booking form never exists without a chosen doctor.
    pub fn apply(self, event: PhaseEvent) -> Self {
        match event {
            PhaseEvent::CandidatesResolved(candidates) => ConversationPhase::AwaitingIntent { candidates },
            PhaseEvent::ShowDoctors(candidates) if candidates.is_empty() => {
                ConversationPhase::AwaitingIntent { candidates }
            }
            PhaseEvent::ShowDoctors(candidates) => ConversationPhase::DoctorsShown { candidates },
            PhaseEvent::DoctorChosen { candidates, doctor } => {
                ConversationPhase::BookingInProgress { candidates, doctor }
            }
            PhaseEvent::Reset => ConversationPhase::Greeting,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConversationPhase::Greeting => "greeting",
            ConversationPhase::AwaitingIntent { .. } => "awaiting_intent",
            ConversationPhase::DoctorsShown { .. } => "doctors_shown",
            ConversationPhase::BookingInProgress { .. } => "booking_in_progress",
        }
    }

    pub fn candidates(&self) -> &[AvailabilityView] {
        match self {
            ConversationPhase::Greeting => &[],
            ConversationPhase::AwaitingIntent { candidates }
            | ConversationPhase::DoctorsShown { candidates }
            | ConversationPhase::BookingInProgress { candidates, .. } => candidates,
        }
    }

    pub fn selected_doctor(&self) -> Option<&AvailabilityView> {
        match self {
            ConversationPhase::BookingInProgress { doctor, .. } => Some(doctor),
            _ => None,
        }
    }

    pub fn shows_doctors_list(&self) -> bool {
        matches!(
            self,
            ConversationPhase::DoctorsShown { .. } | ConversationPhase::BookingInProgress { .. }
        )
    }

    pub fn shows_booking_form(&self) -> bool {
        matches!(self, ConversationPhase::BookingInProgress { .. })
    }
}

// ==============================================================================
// SESSION
// ==============================================================================

#[derive(Debug, Clone, PartialEq)]
enum PendingKind {
    /// First analysis of a symptom narrative; offers the doctor list afterwards.
    SymptomAnalysis { doctor_count: usize },
    /// Advice requested through the follow-up offer.
    RequestedAdvice,
    /// A question asked while the doctor list is open.
    ContinuedQuestion { question: String },
}

#[derive(Debug, Clone)]
struct PendingTurn {
    token: u64,
    placeholder_id: u64,
    query: String,
    kind: PendingKind,
}

/// State of one open consultation dialog.
pub struct ConsultationSession {
    id: Uuid,
    services: Arc<ConsultationServices>,
    transcript: Vec<ChatMessage>,
    next_message_id: u64,
    phase: ConversationPhase,
    draft: BookingDraft,
    context: VecDeque<String>,
    turn_counter: u64,
    pending: Option<PendingTurn>,
}

impl ConsultationSession {
    pub fn new(services: Arc<ConsultationServices>) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            services,
            transcript: Vec::new(),
            next_message_id: 1,
            phase: ConversationPhase::Greeting,
            draft: BookingDraft::default(),
            context: VecDeque::with_capacity(CONTEXT_WINDOW),
            turn_counter: 0,
            pending: None,
        };
        session.push_message(Role::Assistant, SEED_GREETING.to_string());
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> &ConversationPhase {
        &self.phase
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn is_awaiting_advice(&self) -> bool {
        self.pending.is_some()
    }

    pub fn snapshot(&self) -> ConsultationSnapshot {
        ConsultationSnapshot {
            id: self.id,
            phase: self.phase.name(),
            transcript: self.transcript.clone(),
            candidates: self.phase.candidates().to_vec(),
            selected_doctor: self.phase.selected_doctor().cloned(),
            draft: self.draft.clone(),
            show_doctors_list: self.phase.shows_doctors_list(),
            show_booking_form: self.phase.shows_booking_form(),
            awaiting_advice: self.is_awaiting_advice(),
        }
    }

    /// Handle one user turn. Replies that need the advice collaborator
    /// leave a placeholder and return the request to run.
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn submit_text(&mut self, text: &str) -> Result<TurnOutcome, ConsultationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ConsultationError::EmptyMessage);
        }

        self.supersede_pending();
        self.turn_counter += 1;
        self.push_message(Role::User, text.to_string());

        let intent = self.services.classifier.classify(text);
        debug!("Turn {} classified as {:?}", self.turn_counter, intent);

        match intent {
            Intent::SpecialtyRequest(specialty) => Ok(self.show_specialty(specialty)),
            Intent::NamedDoctorBooking => Ok(self.book_named_doctor(text)),
            Intent::ImplicitBooking => {
                let all_doctors = self.services.all_doctors();
                self.transition(PhaseEvent::ShowDoctors(all_doctors));
                self.reply("I understand you'd like to book an appointment. Please select a doctor from our available specialists below, and then you can choose your preferred date and time:");
                Ok(TurnOutcome::Replied)
            }
            Intent::SymptomOrQuestion => Ok(self.symptom_or_question(text)),
        }
    }

    fn show_specialty(&mut self, specialty: Specialty) -> TurnOutcome {
        let candidates = AvailabilityService::annotate(
            &self.services.roster,
            self.services.roster.by_specialty(specialty),
        );

        if candidates.is_empty() {
            self.reply(&format!(
                "I'm sorry, there are no {} doctors available right now. Please describe your symptoms and I'll suggest other specialists.",
                specialty
            ));
        } else {
            self.reply(&format!(
                "Here are the available {} doctors. Please select a doctor below to book an appointment:",
                specialty
            ));
        }
        self.transition(PhaseEvent::ShowDoctors(candidates));
        TurnOutcome::Replied
    }

    fn book_named_doctor(&mut self, text: &str) -> TurnOutcome {
        let all_doctors = self.services.all_doctors();
        let found = self.services.matcher.find_match(text, &all_doctors).cloned();

        let Some(doctor) = found else {
            self.reply("I couldn't find a doctor with that exact name in our system. Here are all our available doctors. Please select the doctor you'd like to book with:");
            self.transition(PhaseEvent::ShowDoctors(all_doctors));
            return TurnOutcome::Replied;
        };

        let extracted = self.services.extractor.extract(text);
        let prefilled = self.prefill(extracted);
        self.reply(&format!(
            "Perfect! I found Dr. {}, a {} specialist. Please fill out the booking form below to schedule your appointment.{}",
            doctor.doctor.name_without_title(),
            doctor.doctor.specialty,
            if prefilled { PREFILLED_NOTE } else { "" }
        ));
        self.transition(PhaseEvent::DoctorChosen {
            candidates: vec![doctor.clone()],
            doctor,
        });
        TurnOutcome::Replied
    }

    fn symptom_or_question(&mut self, text: &str) -> TurnOutcome {
        let follow_up = self.services.classifier.detect_follow_up(text);

        if self.phase.shows_doctors_list() {
            if follow_up == Some(FollowUpChoice::ShowDoctors) {
                self.reply_doctors_offered();
                return TurnOutcome::Replied;
            }
            return self.request_advice(
                text.to_string(),
                QUESTION_PLACEHOLDER,
                PendingKind::ContinuedQuestion {
                    question: text.to_string(),
                },
            );
        }

        if let ConversationPhase::AwaitingIntent { candidates } = &self.phase {
            match follow_up {
                Some(FollowUpChoice::ShowDoctors) if !candidates.is_empty() => {
                    let candidates = candidates.clone();
                    self.reply_doctors_offered();
                    self.transition(PhaseEvent::ShowDoctors(candidates));
                    return TurnOutcome::Replied;
                }
                Some(FollowUpChoice::Advice) => {
                    let query = if self.draft.symptoms.is_empty() {
                        text.to_string()
                    } else {
                        self.draft.symptoms.clone()
                    };
                    return self.request_advice(query, QUESTION_PLACEHOLDER, PendingKind::RequestedAdvice);
                }
                _ => {}
            }
        }

        let named_specialty = self.services.resolver.match_specialty(text);
        if self.services.classifier.is_unclear(text, named_specialty.is_some()) {
            debug!("Input not recognised as a health message, asking for clarification");
            self.reply(CLARIFICATION);
            return TurnOutcome::Replied;
        }

        let resolved = self.services.resolver.resolve(text);
        let doctor_count = resolved.doctors.len();
        self.draft.symptoms = text.to_string();
        self.transition(PhaseEvent::CandidatesResolved(resolved.doctors));

        self.request_advice(
            text.to_string(),
            SYMPTOM_PLACEHOLDER,
            PendingKind::SymptomAnalysis { doctor_count },
        )
    }

    fn reply_doctors_offered(&mut self) {
        self.reply("Perfect! Here are the available specialist doctors who can help with your symptoms. Please select a doctor below to book an appointment:");
    }

    fn request_advice(&mut self, query: String, placeholder: &str, kind: PendingKind) -> TurnOutcome {
        let placeholder_id = self.push_message(Role::Assistant, placeholder.to_string());
        let context = self.context_string();
        let token = self.turn_counter;

        self.pending = Some(PendingTurn {
            token,
            placeholder_id,
            query: query.clone(),
            kind,
        });

        TurnOutcome::NeedsAdvice(AdviceRequest { token, query, context })
    }

    /// Apply advice for turn `token`. Returns `false` and changes nothing
    /// when a newer turn (or a reset) has superseded it.
    pub fn complete_advice(&mut self, token: u64, advice: AdviceResponse) -> bool {
        let pending = match self.pending.take() {
            Some(pending) if pending.token == token => pending,
            other => {
                debug!("Discarding stale advice for turn {}", token);
                self.pending = other;
                return false;
            }
        };

        let text = match &pending.kind {
            PendingKind::SymptomAnalysis { doctor_count } => format!(
                "{}\n\n---\n\n**Would you also like to see specialist doctors?**\n\nI've found {} specialist doctors who can help with your symptoms. You can:\n\n1. 🩺 **See available doctors** and book an appointment\n2. 💬 **Continue our conversation** for more health guidance\n\nJust let me know what you'd prefer!",
                advice.message, doctor_count
            ),
            PendingKind::RequestedAdvice => format!(
                "I'd be happy to provide you with health guidance! Here's detailed information:\n\n{}\n\n**⚠️ Important Reminder:** This guidance is for educational purposes and should not replace professional medical advice. If your symptoms persist, worsen, or you have specific concerns, please consider booking an appointment with one of our specialist doctors.\n\nWould you like to see the available doctors now, or do you have any other health questions?",
                advice.message
            ),
            PendingKind::ContinuedQuestion { question } => format!(
                "I understand you'd like to continue our conversation. Based on your question about \"{}\", here's detailed health guidance:\n\n{}\n\n**⚠️ Important Reminder:** This guidance is for educational purposes and should not replace professional medical advice. If your symptoms persist, worsen, or you have specific concerns, please consult with one of the specialists shown above or your primary care physician.\n\nIs there anything specific about your health concerns you'd like me to explain further?",
                question, advice.message
            ),
        };

        self.remember(pending.query, advice.message);

        let now = self.services.clock.now();
        match self.transcript.iter_mut().find(|m| m.id == pending.placeholder_id) {
            Some(placeholder) => {
                placeholder.text = text;
                placeholder.timestamp = now;
            }
            None => {
                warn!("Placeholder {} missing, appending advice instead", pending.placeholder_id);
                self.push_message(Role::Assistant, text);
            }
        }
        true
    }

    /// Choose a doctor from the list currently shown. The most recent user
    /// message is scanned for a date and time to pre-fill the draft.
    pub fn select_doctor(&mut self, doctor_id: u32) -> Result<(), ConsultationError> {
        if !self.phase.shows_doctors_list() {
            return Err(ConsultationError::DoctorNotShown(doctor_id));
        }
        let candidates = self.phase.candidates().to_vec();
        let doctor = candidates
            .iter()
            .find(|view| view.doctor.id == doctor_id)
            .cloned()
            .ok_or(ConsultationError::DoctorNotShown(doctor_id))?;

        let last_user_text = self
            .transcript
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.text.clone());
        let extracted = last_user_text
            .map(|text| self.services.extractor.extract(&text))
            .unwrap_or_default();
        let prefilled = self.prefill(extracted);

        self.reply(&format!(
            "Great choice! Dr. {} is an excellent {} specialist. Please fill out the booking form below to schedule your appointment.{}",
            doctor.doctor.name_without_title(),
            doctor.doctor.specialty,
            if prefilled { PREFILLED_NOTE } else { "" }
        ));
        self.transition(PhaseEvent::DoctorChosen { candidates, doctor });
        Ok(())
    }

    pub fn update_draft(&mut self, update: UpdateDraftRequest) {
        let normalize = |value: String| {
            let trimmed = value.trim().to_string();
            (!trimmed.is_empty()).then_some(trimmed)
        };

        if let Some(date) = update.selected_date {
            self.draft.selected_date = normalize(date);
        }
        if let Some(time) = update.selected_time {
            self.draft.selected_time = normalize(time);
        }
        if let Some(appointment_type) = update.appointment_type {
            self.draft.appointment_type = appointment_type;
        }
        if let Some(full_name) = update.full_name {
            self.draft.full_name = full_name;
        }
        if let Some(email) = update.email {
            self.draft.email = email;
        }
        if let Some(phone) = update.phone {
            self.draft.phone = phone;
        }
        if let Some(symptoms) = update.symptoms {
            self.draft.symptoms = symptoms;
        }
    }

    /// Confirm the booking and reset the session. A missing date or time
    /// keeps the draft and the phase untouched.
    pub fn submit_booking(&mut self) -> Result<BookingConfirmation, ConsultationError> {
        let doctor = self
            .phase
            .selected_doctor()
            .map(|view| view.doctor.clone())
            .ok_or(ConsultationError::NoDoctorSelected)?;

        let (date, time) = match (&self.draft.selected_date, &self.draft.selected_time) {
            (Some(date), Some(time)) if self.draft.has_date_and_time() => (date.clone(), time.clone()),
            _ => return Err(ConsultationError::IncompleteBooking),
        };

        let appointment_type = self.draft.appointment_type;
        let confirmation = BookingConfirmation {
            message: format!(
                "Appointment booked with {} on {} at {} for {}!",
                doctor.name, date, time, appointment_type
            ),
            doctor,
            date,
            time,
            appointment_type,
        };

        info!(
            "Consultation {} booked {} on {} at {} ({})",
            self.id, confirmation.doctor.name, confirmation.date, confirmation.time, appointment_type
        );

        self.reset();
        Ok(confirmation)
    }

    /// Back to the seed greeting with an empty draft. The turn counter keeps
    /// counting so advice still in flight is recognised as stale.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.next_message_id = 1;
        self.draft = BookingDraft::default();
        self.context.clear();
        self.pending = None;
        self.transition(PhaseEvent::Reset);
        self.push_message(Role::Assistant, SEED_GREETING.to_string());
    }

    fn transition(&mut self, event: PhaseEvent) {
        let phase = std::mem::take(&mut self.phase);
        self.phase = phase.apply(event);
        debug!("Consultation {} now in phase {}", self.id, self.phase.name());
    }

    fn prefill(&mut self, extracted: ExtractedSchedule) -> bool {
        if extracted.is_empty() {
            return false;
        }
        if let Some(date) = extracted.date {
            self.draft.selected_date = Some(date);
        }
        if let Some(time) = extracted.time {
            self.draft.selected_time = Some(time);
        }
        true
    }

    fn supersede_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!("Turn {} superseded before its advice arrived", pending.token);
            self.transcript.retain(|m| m.id != pending.placeholder_id);
        }
    }

    fn remember(&mut self, query: String, reply: String) {
        for entry in [query, reply] {
            if self.context.len() == CONTEXT_WINDOW {
                self.context.pop_front();
            }
            self.context.push_back(entry);
        }
    }

    fn context_string(&self) -> String {
        let skip = self.context.len().saturating_sub(CONTEXT_TAIL);
        self.context
            .iter()
            .skip(skip)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" | ")
    }

    fn reply(&mut self, text: &str) -> u64 {
        self.push_message(Role::Assistant, text.to_string())
    }

    fn push_message(&mut self, role: Role, text: String) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.transcript.push(ChatMessage {
            id,
            role,
            text,
            timestamp: self.services.clock.now(),
        });
        id
    }
}
