use std::{collections::BTreeMap, fmt, str::FromStr};

/// Initial variable bindings: name to value.
pub type Variables = BTreeMap<String, i64>;
/// Initial arrays: name to contents. Arrays keep their length for the whole
/// run.
pub type Arrays = BTreeMap<String, Vec<i64>>;
/// Channel contents.
pub type Channels = BTreeMap<Channel, Vec<i64>>;

/// The two I/O channels of a program.
///
/// Channels are part of the program state but no command reads or writes
/// them yet; they are carried through a run unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    /// The input channel, `in`.
    In,
    /// The output channel, `out`.
    Out,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "in"),
            Self::Out => write!(f, "out"),
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            other => Err(format!("unknown channel '{other}', expected 'in' or 'out'")),
        }
    }
}

/// The state a program runs against.
///
/// Memory is a thin store of three independent mappings. It performs no
/// validation of its own: the evaluator decides what an undefined name or an
/// out-of-range index means.
///
/// ## Usage
///
/// A `Memory` is built once per run from caller-supplied values, mutated in
/// place by assignments, and handed back to the caller when the run ends.
///
/// ```
/// use gcl::interpreter::memory::{Arrays, Channels, Memory, Variables};
///
/// let mut memory = Memory::new();
/// memory.initialize(Variables::from([("x".to_string(), 5)]),
///                   Arrays::from([("A".to_string(), vec![1, 2, 3])]),
///                   Channels::new());
///
/// assert_eq!(memory.read_var("x"), Some(5));
/// assert!(memory.update_array("A", 2, 9));
/// assert!(!memory.update_array("A", 3, 9));
/// assert_eq!(memory.read_array("A"), Some(&[1, 2, 9][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    vars:     Variables,
    arrays:   Arrays,
    channels: Channels,
}

impl Default for Memory {
    fn default() -> Self {
        Self { vars:     Variables::new(),
               arrays:   Arrays::new(),
               channels: Channels::from([(Channel::In, Vec::new()), (Channel::Out, Vec::new())]), }
    }
}

impl Memory {
    /// Creates an empty memory with both channels present and empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a memory holding the given values.
    #[must_use]
    pub fn with_values(vars: Variables, arrays: Arrays, channels: Channels) -> Self {
        let mut memory = Self::new();
        memory.initialize(vars, arrays, channels);
        memory
    }

    /// Replaces all three mappings wholesale.
    ///
    /// A channel missing from `channels` is created empty.
    pub fn initialize(&mut self, vars: Variables, arrays: Arrays, channels: Channels) {
        self.vars = vars;
        self.arrays = arrays;
        self.channels = channels;
        for channel in [Channel::In, Channel::Out] {
            self.channels.entry(channel).or_default();
        }
    }

    /// Reads a variable.
    #[must_use]
    pub fn read_var(&self, name: &str) -> Option<i64> {
        self.vars.get(name).copied()
    }

    /// Binds `name` to `value`, defining the variable if needed.
    pub fn update_var(&mut self, name: &str, value: i64) {
        self.vars.insert(name.to_string(), value);
    }

    /// Reads a whole array.
    #[must_use]
    pub fn read_array(&self, name: &str) -> Option<&[i64]> {
        self.arrays.get(name).map(Vec::as_slice)
    }

    /// Reads one array element.
    ///
    /// Returns `None` when the array does not exist or `index` is outside
    /// `[0, len)`.
    #[must_use]
    pub fn read_array_element(&self, name: &str, index: i64) -> Option<i64> {
        let index = usize::try_from(index).ok()?;
        self.arrays.get(name)?.get(index).copied()
    }

    /// Writes one array element in place.
    ///
    /// Returns `false`, leaving memory untouched, when the array does not
    /// exist or `index` is outside `[0, len)`. Arrays never grow.
    pub fn update_array(&mut self, name: &str, index: i64, value: i64) -> bool {
        let Ok(index) = usize::try_from(index) else {
            return false;
        };
        match self.arrays.get_mut(name).and_then(|a| a.get_mut(index)) {
            Some(slot) => {
                *slot = value;
                true
            },
            None => false,
        }
    }

    /// Reads the contents of a channel.
    #[must_use]
    pub fn read_channel(&self, channel: Channel) -> Option<&[i64]> {
        self.channels.get(&channel).map(Vec::as_slice)
    }

    /// All variables, ordered by name.
    #[must_use]
    pub const fn vars(&self) -> &Variables {
        &self.vars
    }

    /// All arrays, ordered by name.
    #[must_use]
    pub const fn arrays(&self) -> &Arrays {
        &self.arrays
    }

    /// Both channels.
    #[must_use]
    pub const fn channels(&self) -> &Channels {
        &self.channels
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[i64]) -> fmt::Result {
    write!(f, "[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{v}")?;
    }
    write!(f, "]")
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.vars {
            writeln!(f, "{name} = {value}")?;
        }
        for (name, values) in &self.arrays {
            write!(f, "{name} = ")?;
            write_list(f, values)?;
            writeln!(f)?;
        }
        for (channel, values) in &self.channels {
            write!(f, "{channel} = ")?;
            write_list(f, values)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
