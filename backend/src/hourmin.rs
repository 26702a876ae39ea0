use std::fmt;

/// Wall-clock time as submitted by a `<input type="time">`, `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HourMin {
    hour: u8,
    min: u8,
}

impl HourMin {
    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn min(&self) -> u8 {
        self.min
    }
}

impl TryFrom<&str> for HourMin {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        //ensure only 5 chars, two digits on each side of the colon
        let bytes = value.as_bytes();
        if bytes.len() != 5 {
            return Err(format!("Invalid length: {}", bytes.len()));
        }
        if bytes[2] != b':' {
            return Err("Missing separator".to_string());
        }
        if ![0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit()) {
            return Err(format!("Invalid digits: {}", value));
        }
        let (hour, min) = (&value[..2], &value[3..]);
        let hour = hour
            .parse::<u8>()
            .map_err(|e| format!("Invalid hour: {}", e))?;
        if hour > 23 {
            return Err(format!("Invalid hour, value too high: {}", hour));
        }

        let min = min
            .parse::<u8>()
            .map_err(|e| format!("Invalid min: {}", e))?;
        if min > 59 {
            return Err(format!("Invalid min, value too high: {}", min));
        }
        Ok(Self { hour, min })
    }
}

impl fmt::Display for HourMin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.min)
    }
}
