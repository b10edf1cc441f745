pub mod add_friend;
