use super::event::{sort_by_start, Event};

/// The signed in user's events and the friends' events they may see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
  mine: Vec<Event>,
  friends: Vec<Event>,
}

/// Own events of a single day, split by visibility.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DayGroups<'a> {
  pub public: Vec<&'a Event>,
  pub private: Vec<&'a Event>,
}

impl Partition {
  /// Splits `events` by author. Private events of other authors are dropped.
  pub fn split(events: Vec<Event>, email: &str) -> Self {
    let (mine, friends): (Vec<_>, Vec<_>) = events.into_iter().partition(|event| event.email == email);

    let hidden = friends.iter().filter(|event| !event.is_public()).count();
    if hidden > 0 {
      log::warn!("Dropping {hidden} private events of other users");
    }

    Self {
      mine,
      friends: friends.into_iter().filter(Event::is_public).collect(),
    }
  }

  pub fn mine(&self) -> &[Event] {
    &self.mine
  }

  pub fn friends(&self) -> &[Event] {
    &self.friends
  }

  pub fn len_mine(&self) -> usize {
    self.mine.len()
  }

  pub fn len_friends(&self) -> usize {
    self.friends.len()
  }

  pub fn is_empty(&self) -> bool {
    self.mine.is_empty() && self.friends.is_empty()
  }

  pub fn all(&self) -> impl Iterator<Item = &Event> {
    self.mine.iter().chain(self.friends.iter())
  }

  pub fn mine_on(&self, key: &str) -> Vec<&Event> {
    self.mine.iter().filter(|event| event.is_on(key)).collect()
  }

  pub fn friends_on(&self, key: &str) -> Vec<&Event> {
    self.friends.iter().filter(|event| event.is_on(key)).collect()
  }

  pub fn has_friends_on(&self, key: &str) -> bool {
    self.friends.iter().any(|event| event.is_on(key))
  }

  pub fn groups_on(&self, key: &str) -> DayGroups<'_> {
    let (public, private) = self.mine_on(key).into_iter().partition(|event| event.is_public());

    DayGroups { public, private }
  }

  /// Own events of the day in start time order.
  pub fn sorted_mine_on(&self, key: &str) -> Vec<&Event> {
    let mut events = self.mine_on(key);
    sort_by_start(&mut events);
    events
  }

  /// Friends' events of the day in start time order.
  pub fn sorted_friends_on(&self, key: &str) -> Vec<&Event> {
    let mut events = self.friends_on(key);
    sort_by_start(&mut events);
    events
  }

  pub fn find_mine(&self, id: &str) -> Option<&Event> {
    self.mine.iter().find(|event| event.has_id(id))
  }

  pub fn push_mine(&mut self, event: Event) {
    self.mine.push(event);
  }

  /// Returns false if no own event carries the id of `event`.
  pub fn replace_mine(&mut self, event: Event) -> bool {
    let Some(id) = event.id() else {
      return false;
    };

    match self.mine.iter_mut().find(|existing| existing.has_id(id)) {
      Some(existing) => {
        *existing = event;
        true
      }
      None => false,
    }
  }

  /// Returns false if no own event carries `id`.
  pub fn remove_mine(&mut self, id: &str) -> bool {
    let before = self.mine.len();
    self.mine.retain(|event| !event.has_id(id));

    before != self.mine.len()
  }

  pub fn clear(&mut self) {
    self.mine.clear();
    self.friends.clear();
  }
}

#[cfg(test)]
mod tests {
  use crate::calendar::Visibility;

  use super::*;

  const ME: &str = "me@example.org";

  fn event(id: &str, email: &str, date: &str, visibility: Visibility) -> Event {
    Event {
      event_id: Some(id.into()),
      email: email.into(),
      date: date.into(),
      visibility,
      ..Event::default()
    }
  }

  fn sample() -> Vec<Event> {
    vec![
      event("1", ME, "2024-03-15", Visibility::Public),
      event("2", "kim@example.org", "2024-03-15", Visibility::Public),
      event("3", ME, "2024-03-15", Visibility::Private),
      event("4", "kim@example.org", "2024-03-15", Visibility::Private),
      event("5", "ola@example.org", "2024-03-16", Visibility::Public),
      event("6", ME, "2024-03-16", Visibility::Public),
    ]
  }

  fn ids<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<&'a str> {
    events.into_iter().filter_map(Event::id).collect()
  }

  #[test]
  fn every_event_lands_in_exactly_one_side() {
    let partition = Partition::split(sample(), ME);

    assert_eq!(ids(partition.mine()), ["1", "3", "6"]);
    assert_eq!(ids(partition.friends()), ["2", "5"]);

    for event in partition.mine() {
      assert!(!partition.friends().contains(event));
    }
  }

  #[test]
  fn friends_never_contain_private_events() {
    let partition = Partition::split(sample(), ME);

    assert!(partition.friends().iter().all(Event::is_public));
    assert_eq!(partition.len_friends(), 2);
  }

  #[test]
  fn day_groups_split_by_visibility() {
    let partition = Partition::split(sample(), ME);
    let groups = partition.groups_on("2024-03-15");

    assert_eq!(ids(groups.public), ["1"]);
    assert_eq!(ids(groups.private), ["3"]);
    assert!(partition.has_friends_on("2024-03-16"));
    assert!(!partition.has_friends_on("2024-03-17"));
  }

  #[test]
  fn replace_and_remove_by_id() {
    let mut partition = Partition::split(sample(), ME);
    let mut changed = event("6", ME, "2024-03-20", Visibility::Private);
    changed.status = "moved".into();

    assert!(partition.replace_mine(changed));
    assert_eq!(partition.find_mine("6").map(|e| e.status.as_str()), Some("moved"));
    assert!(!partition.replace_mine(event("99", ME, "2024-03-20", Visibility::Public)));

    assert!(partition.remove_mine("1"));
    assert!(!partition.remove_mine("1"));
    assert_eq!(ids(partition.mine()), ["3", "6"]);
    assert_eq!(partition.len_friends(), 2);
  }
}
