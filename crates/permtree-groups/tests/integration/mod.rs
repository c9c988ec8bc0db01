mod composition;
mod round_trip;
