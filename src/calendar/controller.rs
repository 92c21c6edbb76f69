use chrono::{Datelike as _, NaiveDate};

use super::client::{Store, User};
use super::date;
use super::editor::{Editor, ImportSource};
use super::error::{Error, ErrorKind};
use super::event::Event;
use super::layout::{self, Layout, ViewMode};
use super::partition::Partition;

const SIGN_IN_REQUIRED: &str = "Please sign in to manage your events.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Prev,
  Next,
}

impl Direction {
  const fn amount(self) -> i32 {
    match self {
      Self::Prev => -1,
      Self::Next => 1,
    }
  }
}

/// The account a request was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
  pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
  Identify,
  Load(Scope),
  Create(Scope, Event),
  Update(Scope, Event),
  Delete(Scope, String),
  Import(Scope, ImportSource),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
  Identified(Result<User, Error>),
  Loaded(Scope, Result<Vec<Event>, Error>),
  Created(Scope, Event, Result<String, Error>),
  Updated(Scope, Event, Result<(), Error>),
  Deleted(Scope, String, Result<(), Error>),
  Imported(Scope, Result<String, Error>),
}

impl Request {
  /// Performs the request against `store`. Blocking.
  pub fn send(self, store: &impl Store) -> Response {
    match self {
      Self::Identify => Response::Identified(store.me()),
      Self::Load(scope) => {
        let result = store.events(&scope.email);
        Response::Loaded(scope, result)
      }
      Self::Create(scope, event) => {
        let result = store.create(&event);
        Response::Created(scope, event, result)
      }
      Self::Update(scope, event) => {
        let result = match event.id() {
          Some(id) => store.update(id, &event),
          None => Err(Error::validation("Only saved events can be updated")),
        };
        Response::Updated(scope, event, result)
      }
      Self::Delete(scope, id) => {
        let result = store.delete(&id);
        Response::Deleted(scope, id, result)
      }
      Self::Import(scope, source) => {
        let result = store.import(&source);
        Response::Imported(scope, result)
      }
    }
  }
}

impl Response {
  const fn scope(&self) -> Option<&Scope> {
    match self {
      Self::Identified(_) => None,
      Self::Loaded(scope, _)
      | Self::Created(scope, _, _)
      | Self::Updated(scope, _, _)
      | Self::Deleted(scope, _, _)
      | Self::Imported(scope, _) => Some(scope),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
  None,
  Editor(Editor),
  DayDetail(NaiveDate),
  FriendDetail(NaiveDate),
  ConfirmDelete { event: Event, busy: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
  Info,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub kind: NoticeKind,
  pub message: String,
}

impl Notice {
  pub fn info(message: impl Into<String>) -> Self {
    Self {
      kind: NoticeKind::Info,
      message: message.into(),
    }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self {
      kind: NoticeKind::Error,
      message: message.into(),
    }
  }
}

/// State of the calendar page. Emits [`Request`]s and applies their [`Response`]s.
#[derive(Debug)]
pub struct Controller {
  anchor: NaiveDate,
  today: NaiveDate,
  view: ViewMode,
  user: Option<User>,
  events: Partition,
  modal: Modal,
  notice: Option<Notice>,
  loading: bool,
  identifying: bool,
}

impl Controller {
  pub fn new(today: NaiveDate, view: ViewMode) -> Self {
    Self {
      anchor: today,
      today,
      view,
      user: None,
      events: Partition::default(),
      modal: Modal::None,
      notice: None,
      loading: false,
      identifying: false,
    }
  }

  pub const fn anchor(&self) -> NaiveDate {
    self.anchor
  }

  pub const fn current_day(&self) -> NaiveDate {
    self.today
  }

  pub const fn view(&self) -> ViewMode {
    self.view
  }

  pub const fn user(&self) -> Option<&User> {
    self.user.as_ref()
  }

  pub const fn events(&self) -> &Partition {
    &self.events
  }

  pub const fn modal(&self) -> &Modal {
    &self.modal
  }

  pub const fn notice(&self) -> Option<&Notice> {
    self.notice.as_ref()
  }

  pub const fn is_loading(&self) -> bool {
    self.loading
  }

  /// An `/api/me` request is in flight and its answer will be applied.
  pub const fn is_identifying(&self) -> bool {
    self.identifying
  }

  pub const fn is_signed_in(&self) -> bool {
    self.user.is_some()
  }

  pub fn layout(&self) -> Layout<'_> {
    layout::render(self.view, self.anchor, &self.events)
  }

  pub fn editor_mut(&mut self) -> Option<&mut Editor> {
    match &mut self.modal {
      Modal::Editor(editor) => Some(editor),
      _ => None,
    }
  }

  pub fn change_view(&mut self, view: ViewMode) {
    self.view = view;
  }

  pub fn navigate(&mut self, direction: Direction) {
    self.anchor = date::shift(self.anchor, self.view.unit(), direction.amount());
  }

  /// Moves the anchor to `today`, which also becomes the highlighted day.
  pub fn today(&mut self, today: NaiveDate) {
    self.today = today;
    self.anchor = today;
  }

  pub fn set_current_day(&mut self, today: NaiveDate) {
    self.today = today;
  }

  /// Jumps from the year overview to the month grid of `month`.
  pub fn open_month(&mut self, month: u32) {
    if let Some(date) = NaiveDate::from_ymd_opt(self.anchor.year(), month, 1) {
      self.anchor = date;
      self.view = ViewMode::Month;
    }
  }

  fn scope(&self) -> Option<Scope> {
    self.user.as_ref().map(|user| Scope {
      email: user.email.clone(),
    })
  }

  fn require_scope(&self) -> Result<Scope, Error> {
    self.scope().ok_or_else(|| Error::auth_required(SIGN_IN_REQUIRED))
  }

  pub fn identify(&mut self) -> Request {
    self.loading = true;
    self.identifying = true;
    Request::Identify
  }

  /// Signs in with a remembered account until the session is identified again.
  pub fn restore(&mut self, user: User) -> Request {
    let scope = Scope {
      email: user.email.clone(),
    };
    self.user = Some(user);
    self.loading = true;

    Request::Load(scope)
  }

  pub fn notify(&mut self, notice: Notice) {
    self.notice = Some(notice);
  }

  pub fn sign_out(&mut self) {
    if let Some(user) = self.user.take() {
      log::info!("Signed out {}", user.email);
    }

    self.events.clear();
    self.modal = Modal::None;
    self.notice = None;
    self.loading = false;
    self.identifying = false;
  }

  /// # Errors
  /// Returns an error if nobody is signed in.
  pub fn load_events(&mut self) -> Result<Request, Error> {
    let scope = self.require_scope()?;
    self.loading = true;

    Ok(Request::Load(scope))
  }

  /// # Errors
  /// Returns an error if nobody is signed in.
  pub fn request_create(&self, event: Event) -> Result<Request, Error> {
    Ok(Request::Create(self.require_scope()?, event))
  }

  /// # Errors
  /// Returns an error if nobody is signed in or `event` was never saved.
  pub fn request_update(&self, event: Event) -> Result<Request, Error> {
    let scope = self.require_scope()?;

    if !event.event_id.as_deref().is_some_and(|id| !id.is_empty()) {
      return Err(Error::validation("Only saved events can be updated"));
    }

    Ok(Request::Update(scope, event))
  }

  /// # Errors
  /// Returns an error if nobody is signed in.
  pub fn request_delete(&self, id: &str) -> Result<Request, Error> {
    Ok(Request::Delete(self.require_scope()?, id.to_owned()))
  }

  /// Opens an empty editor for `date`.
  ///
  /// # Errors
  /// Returns an error if nobody is signed in.
  pub fn open_add(&mut self, date: NaiveDate) -> Result<(), Error> {
    if let Err(error) = self.require_scope() {
      self.notice = Some(Notice::error(&error.message));
      return Err(error);
    }

    self.modal = Modal::Editor(Editor::create(date));
    Ok(())
  }

  /// # Errors
  /// Returns an error if none of the own events has `id`.
  pub fn open_edit(&mut self, id: &str) -> Result<(), Error> {
    let Some(event) = self.events.find_mine(id) else {
      let error = Error::validation(format!("Event {id} is no longer available"));
      self.notice = Some(Notice::error(&error.message));
      return Err(error);
    };

    self.modal = Modal::Editor(Editor::edit(event));
    Ok(())
  }

  pub fn select_day(&mut self, date: NaiveDate) {
    self.modal = Modal::DayDetail(date);
  }

  pub fn select_friend_day(&mut self, date: NaiveDate) {
    self.modal = Modal::FriendDetail(date);
  }

  /// Asks for confirmation before deleting the own event `id`.
  pub fn ask_delete(&mut self, id: &str) {
    if let Some(event) = self.events.find_mine(id) {
      self.modal = Modal::ConfirmDelete {
        event: event.clone(),
        busy: false,
      };
    }
  }

  pub fn confirm_delete(&mut self) -> Option<Request> {
    let Modal::ConfirmDelete { event, busy } = &self.modal else {
      return None;
    };

    if *busy {
      return None;
    }

    let request = event.id().map(|id| self.request_delete(id));

    match request {
      Some(Ok(request)) => {
        if let Modal::ConfirmDelete { busy, .. } = &mut self.modal {
          *busy = true;
        }
        Some(request)
      }
      Some(Err(error)) => {
        self.modal = Modal::None;
        self.notice = Some(Notice::error(error.message));
        None
      }
      None => {
        self.modal = Modal::None;
        None
      }
    }
  }

  pub fn close_modal(&mut self) {
    self.modal = Modal::None;
  }

  pub fn dismiss_notice(&mut self) {
    self.notice = None;
  }

  /// Validates the open editor and emits a create or update request.
  /// Validation failures stay in the editor and emit nothing.
  pub fn submit_editor(&mut self) -> Option<Request> {
    let email = self.user.as_ref().map(|user| user.email.clone());
    let editor = self.editor_mut()?;

    if editor.is_busy() {
      return None;
    }

    let Some(email) = email else {
      editor.error = Some(SIGN_IN_REQUIRED.to_owned());
      return None;
    };

    let event = editor.submit(&email).ok()?;
    let request = if editor.is_editing() {
      self.request_update(event)
    } else {
      self.request_create(event)
    };

    match request {
      Ok(request) => {
        if let Some(editor) = self.editor_mut() {
          editor.set_busy(true);
        }
        Some(request)
      }
      Err(error) => {
        self.fail_editor(error);
        None
      }
    }
  }

  /// Emits an import request from the editor's import fields.
  pub fn submit_import(&mut self) -> Option<Request> {
    let scope = self.scope();
    let Some(editor) = self.editor_mut() else {
      self.notice = Some(Notice::error(SIGN_IN_REQUIRED));
      return None;
    };

    if editor.is_busy() {
      return None;
    }

    let Some(scope) = scope else {
      editor.error = Some(SIGN_IN_REQUIRED.to_owned());
      return None;
    };

    let source = editor.import_source().ok()?;
    editor.set_busy(true);

    Some(Request::Import(scope, source))
  }

  /// Applies a completed request. Responses for another account than the
  /// signed in one are dropped. Returns the follow-up request, if any.
  pub fn apply(&mut self, response: Response) -> Option<Request> {
    if let Some(scope) = response.scope() {
      if self.scope().as_ref() != Some(scope) {
        log::debug!("Dropping response issued for {}", scope.email);
        return None;
      }
    } else if !self.identifying {
      log::debug!("Dropping identity response nobody waits for");
      return None;
    }

    match response {
      Response::Identified(Ok(user)) => {
        log::info!("Signed in as {}", user.email);
        let scope = Scope {
          email: user.email.clone(),
        };
        if self.scope().is_some_and(|restored| restored != scope) {
          self.events.clear();
        }
        self.user = Some(user);
        self.loading = true;
        self.identifying = false;

        Some(Request::Load(scope))
      }
      Response::Identified(Err(error)) if error.is(ErrorKind::AuthRequired) => {
        log::error!("Session token was rejected: {error}");
        self.sign_out();
        self.notice = Some(Notice::error(error.message));

        None
      }
      Response::Identified(Err(error)) => {
        log::warn!("Failed to identify the session: {error}");
        self.identifying = false;
        if self.user.is_none() {
          self.loading = false;
        }
        self.notice = Some(Notice::error(error.message));

        None
      }
      Response::Loaded(scope, Ok(events)) => {
        self.events = Partition::split(events, &scope.email);
        self.loading = false;
        log::info!(
          "Fetched events: {} own, {} from friends",
          self.events.len_mine(),
          self.events.len_friends()
        );

        None
      }
      Response::Loaded(_, Err(error)) => {
        log::error!("Failed to fetch events: {error}");
        self.loading = false;
        self.notice = Some(Notice::error(error.message));

        None
      }
      Response::Created(scope, mut event, Ok(id)) => {
        log::info!("Created event {id}");
        event.event_id = Some(id);
        self.events.push_mine(event);
        self.close_editor();

        Some(Request::Load(scope))
      }
      Response::Updated(scope, event, Ok(())) => {
        log::info!("Updated event {}", event.id().unwrap_or_default());
        if !self.events.replace_mine(event) {
          log::warn!("Updated event is not in the loaded events");
        }
        self.close_editor();

        Some(Request::Load(scope))
      }
      Response::Created(_, _, Err(error)) | Response::Updated(_, _, Err(error)) => {
        log::error!("Failed to save event: {error}");
        self.fail_editor(error);

        None
      }
      Response::Deleted(scope, id, Ok(())) => {
        log::info!("Deleted event {id}");
        self.events.remove_mine(&id);
        if matches!(self.modal, Modal::ConfirmDelete { .. }) {
          self.modal = Modal::None;
        }

        Some(Request::Load(scope))
      }
      Response::Deleted(_, id, Err(error)) => {
        log::error!("Failed to delete event {id}: {error}");
        if matches!(self.modal, Modal::ConfirmDelete { .. }) {
          self.modal = Modal::None;
        }
        self.notice = Some(Notice::error(error.message));

        None
      }
      Response::Imported(scope, Ok(message)) => {
        log::info!("Imported timetable: {message}");
        self.close_editor();
        self.notice = Some(Notice::info(if message.trim().is_empty() {
          "Timetable imported".to_owned()
        } else {
          message
        }));

        Some(Request::Load(scope))
      }
      Response::Imported(_, Err(error)) => {
        log::error!("Failed to import timetable: {error}");
        self.fail_editor(error);

        None
      }
    }
  }

  fn close_editor(&mut self) {
    if matches!(self.modal, Modal::Editor(_)) {
      self.modal = Modal::None;
    }
  }

  fn fail_editor(&mut self, error: Error) {
    match self.editor_mut() {
      Some(editor) => {
        editor.set_busy(false);
        editor.error = Some(error.message);
      }
      None => self.notice = Some(Notice::error(error.message)),
    }
  }
}
