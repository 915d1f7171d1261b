//! Mock implementations for the booking client, notifier, state store
//! and chat auth gateway traits
//!
//! The mocks keep their state behind `Arc<Mutex<..>>` so cloned handles
//! observe the same calls, which lets tests hold a handle while the
//! system under test owns another.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use korres_core::models::{
    Reservation, ReserveOutcome, Schedule, SearchRequest, Station, Ticket, UserProfile,
};
use korres_core::traits::{
    BookingClient, ChatAuthGateway, NotificationMessage, Notifier, StateStore,
};
use korres_core::{KorresError, KorresResult};

/// Mock implementation of BookingClient for testing
///
/// `reserve` pops scripted outcomes front to back; the last outcome
/// repeats once the script is exhausted. With no script every attempt
/// fails. An optional gate blocks `reserve` until the test releases it
/// with [`Notify::notify_one`], which makes in-flight attempts
/// controllable.
#[derive(Clone)]
pub struct MockBookingClient {
    outcomes: Arc<Mutex<VecDeque<ReserveOutcome>>>,
    reserve_calls: Arc<Mutex<Vec<String>>>,
    reserve_error: Arc<Mutex<Option<String>>>,
    login_error: Arc<Mutex<Option<String>>>,
    schedules: Arc<Mutex<Vec<Schedule>>>,
    stations: Arc<Mutex<Vec<Station>>>,
    reservations: Arc<Mutex<Vec<Reservation>>>,
    tickets: Arc<Mutex<Vec<Ticket>>>,
    cancelled: Arc<Mutex<Vec<String>>>,
    gate: Option<Arc<Notify>>,
}

impl MockBookingClient {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            reserve_calls: Arc::new(Mutex::new(Vec::new())),
            reserve_error: Arc::new(Mutex::new(None)),
            login_error: Arc::new(Mutex::new(None)),
            schedules: Arc::new(Mutex::new(Vec::new())),
            stations: Arc::new(Mutex::new(Vec::new())),
            reservations: Arc::new(Mutex::new(Vec::new())),
            tickets: Arc::new(Mutex::new(Vec::new())),
            cancelled: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    pub fn with_outcomes(outcomes: Vec<ReserveOutcome>) -> Self {
        let client = Self::new();
        *client.outcomes.lock().unwrap() = outcomes.into();
        client
    }

    /// Every `reserve` call returns a transport-level error
    pub fn with_reserve_error(message: &str) -> Self {
        let client = Self::new();
        *client.reserve_error.lock().unwrap() = Some(message.to_string());
        client
    }

    pub fn with_login_error(message: &str) -> Self {
        let client = Self::new();
        *client.login_error.lock().unwrap() = Some(message.to_string());
        client
    }

    /// Block each `reserve` call until the gate is notified
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn with_schedules(self, schedules: Vec<Schedule>) -> Self {
        *self.schedules.lock().unwrap() = schedules;
        self
    }

    pub fn with_stations(self, stations: Vec<Station>) -> Self {
        *self.stations.lock().unwrap() = stations;
        self
    }

    pub fn with_reservations(self, reservations: Vec<Reservation>) -> Self {
        *self.reservations.lock().unwrap() = reservations;
        self
    }

    pub fn reserve_call_count(&self) -> usize {
        self.reserve_calls.lock().unwrap().len()
    }

    /// Train numbers passed to `reserve`, in call order
    pub fn reserved_train_nos(&self) -> Vec<String> {
        self.reserve_calls.lock().unwrap().clone()
    }

    pub fn cancelled_pnr_nos(&self) -> Vec<String> {
        self.cancelled.lock().unwrap().clone()
    }

    fn next_outcome(&self) -> ReserveOutcome {
        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.len() > 1 {
            outcomes.pop_front().unwrap()
        } else if let Some(last) = outcomes.front() {
            last.clone()
        } else {
            ReserveOutcome::failure("WRR800029", "잔여석이 없습니다")
        }
    }
}

impl Default for MockBookingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingClient for MockBookingClient {
    async fn login(&self, _member_id: &str, _password: &str) -> KorresResult<UserProfile> {
        if let Some(message) = self.login_error.lock().unwrap().clone() {
            return Err(KorresError::LoginFailed(message));
        }
        Ok(UserProfile {
            name: "테스트사용자".to_string(),
            membership_number: "000000000".to_string(),
            email: String::new(),
        })
    }

    async fn reserve(&self, schedule: &Schedule, _seat_count: u32) -> KorresResult<ReserveOutcome> {
        self.reserve_calls
            .lock()
            .unwrap()
            .push(schedule.train_no.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if let Some(message) = self.reserve_error.lock().unwrap().clone() {
            return Err(KorresError::network(message));
        }

        Ok(self.next_outcome())
    }

    async fn schedule_search(&self, _request: &SearchRequest) -> KorresResult<Vec<Schedule>> {
        Ok(self.schedules.lock().unwrap().clone())
    }

    async fn my_reservations(&self) -> KorresResult<Vec<Reservation>> {
        Ok(self.reservations.lock().unwrap().clone())
    }

    async fn cancel_reservation(&self, reservation: &Reservation) -> KorresResult<()> {
        self.cancelled
            .lock()
            .unwrap()
            .push(reservation.pnr_no.clone());
        Ok(())
    }

    async fn my_tickets(&self) -> KorresResult<Vec<Ticket>> {
        Ok(self.tickets.lock().unwrap().clone())
    }

    async fn station_list(&self) -> KorresResult<Vec<Station>> {
        Ok(self.stations.lock().unwrap().clone())
    }
}

/// Notifier that records every message it is asked to send
#[derive(Clone)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<NotificationMessage>>>,
    fail: Arc<Mutex<bool>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Make subsequent notify calls fail (the message is still recorded)
    pub fn failing() -> Self {
        let notifier = Self::new();
        *notifier.fail.lock().unwrap() = true;
        notifier
    }

    pub fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn messages(&self) -> Vec<NotificationMessage> {
        self.messages.lock().unwrap().clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, message: &NotificationMessage) -> KorresResult<()> {
        self.messages.lock().unwrap().push(message.clone());
        if *self.fail.lock().unwrap() {
            return Err(KorresError::Notification("notifier down".to_string()));
        }
        Ok(())
    }
}

/// In-memory StateStore for testing
#[derive(Clone)]
pub struct MemoryStateStore {
    data: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Synchronous peek for assertions
    pub fn value(&self, key: &str) -> Option<Value> {
        self.data.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.data.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.lock().unwrap().is_empty()
    }
}

impl Default for MemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, key: &str) -> KorresResult<Option<Value>> {
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &str, value: Value) -> KorresResult<()> {
        self.data.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> KorresResult<()> {
        self.data.lock().unwrap().remove(key);
        Ok(())
    }
}

/// ChatAuthGateway that records exchanged authorization codes
#[derive(Clone)]
pub struct MockChatAuthGateway {
    codes: Arc<Mutex<Vec<String>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockChatAuthGateway {
    pub fn new() -> Self {
        Self {
            codes: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn failing() -> Self {
        let gateway = Self::new();
        *gateway.fail.lock().unwrap() = true;
        gateway
    }

    pub fn exchanged_codes(&self) -> Vec<String> {
        self.codes.lock().unwrap().clone()
    }
}

impl Default for MockChatAuthGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatAuthGateway for MockChatAuthGateway {
    async fn exchange_code(&self, code: &str) -> KorresResult<()> {
        if *self.fail.lock().unwrap() {
            return Err(KorresError::Notification("token exchange failed".to_string()));
        }
        self.codes.lock().unwrap().push(code.to_string());
        Ok(())
    }
}
