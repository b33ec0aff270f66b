mod source;

pub use self::source::EmulatedMouseSource;
