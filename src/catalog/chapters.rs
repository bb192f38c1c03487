//! Built-in textbook chapter list

use super::Chapter;

/// Chapters of the tracked textbook, in reading order
pub const CHAPTERS: &[Chapter] = &[
    Chapter::new(1, "Introduction to Computers, Programs, and Java", 32, 13),
    Chapter::new(2, "Elementary Programming", 44, 23),
    Chapter::new(3, "Selections", 44, 34),
    Chapter::new(4, "Mathematical Functions, Characters, and Strings", 38, 26),
    Chapter::new(5, "Loops", 46, 51),
    Chapter::new(6, "Methods", 43, 39),
    Chapter::new(7, "Single-Dimensional Arrays", 41, 37),
    Chapter::new(8, "Multidimensional Arrays", 34, 37),
    Chapter::new(9, "Objects and Classes", 44, 13),
    Chapter::new(10, "Object-Oriented Thinking", 44, 28),
    Chapter::new(11, "Inheritance and Polymorphism", 42, 19),
    Chapter::new(12, "Exception Handling and Text I/O", 46, 22),
    Chapter::new(13, "Abstract Classes and Interfaces", 42, 21),
    Chapter::new(14, "JavaFX Basics", 52, 29),
    Chapter::new(15, "Event-Driven Programming and Animations", 50, 36),
    Chapter::new(16, "JavaFX UI Controls and Multimedia", 48, 31),
    Chapter::new(17, "Binary I/O", 28, 21),
    Chapter::new(18, "Recursion", 32, 38),
    Chapter::new(19, "Generics", 24, 11),
    Chapter::new(20, "Lists, Stacks, Queues, and Priority Queues", 40, 23),
    Chapter::new(21, "Sets and Maps", 24, 15),
    Chapter::new(22, "Developing Efficient Algorithms", 48, 27),
    Chapter::new(23, "Sorting", 36, 19),
    Chapter::new(24, "Implementing Lists, Stacks, Queues, and Priority Queues", 36, 16),
    Chapter::new(25, "Binary Search Trees", 36, 19),
    Chapter::new(26, "AVL Trees", 20, 7),
    Chapter::new(27, "Hashing", 30, 15),
    Chapter::new(28, "Graphs and Applications", 46, 26),
    Chapter::new(29, "Weighted Graphs and Applications", 38, 20),
    Chapter::new(30, "Aggregate Operations for Collection Streams", 31, 19),
];
